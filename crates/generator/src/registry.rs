//! The generator catalogue.

use std::sync::Arc;

use stencil_store::{OverridePolicy, PrefKey, PrefStore, Result as StoreResult};

use crate::error::GeneratorError;
use crate::generator::Generator;
use crate::introspect::Introspector;
use crate::property::PropertyDescriptor;

/// Namespace under which generator property values are persisted.
pub const PROPERTY_NAMESPACE: &str = "stencil.generators";

/// Derives the persisted key for one generator property.
///
/// Pure and injective over (category, property): the category is the
/// generator's unique type id.
pub fn property_key(category: &str, property: &str) -> PrefKey {
	PrefKey::new(PROPERTY_NAMESPACE, category, property)
}

/// A registered generator constructor, collected at link time.
pub struct GeneratorReg {
	/// Builds one instance of the generator type.
	pub build: fn() -> Result<Box<dyn Generator>, GeneratorError>,
}

inventory::collect!(GeneratorReg);

impl GeneratorReg {
	/// Creates a registration from a constructor.
	pub const fn new(build: fn() -> Result<Box<dyn Generator>, GeneratorError>) -> Self {
		Self { build }
	}
}

pub(crate) struct GeneratorInstance {
	pub(crate) generator: Box<dyn Generator>,
	pub(crate) descriptors: Arc<[PropertyDescriptor]>,
}

/// Read access to one catalogued generator and its descriptor list.
pub struct FactoryInfo<'a> {
	/// The live instance.
	pub generator: &'a dyn Generator,
	/// Analyzed property descriptors, in display order.
	pub properties: &'a [PropertyDescriptor],
}

/// Catalogue of live generator instances.
///
/// Instances are indexed `0..factory_count()` for stable addressing within
/// one session; the index is not stable across restarts since discovery
/// order may change.
pub struct Registry {
	pub(crate) store: PrefStore,
	pub(crate) instances: Vec<GeneratorInstance>,
	introspector: Introspector,
}

impl Registry {
	/// Discovers all registered generators and prepares them for use.
	///
	/// Per instance, in fixed order: instantiate, analyze the type's property
	/// table, restore persisted values, then invoke `setup` if the restored
	/// enabled flag is true. Setup never observes a partially-restored
	/// instance.
	///
	/// A failing constructor or setup excludes that instance from the
	/// catalogue with a diagnostic; discovery of the remaining generators
	/// continues.
	pub fn load(store: PrefStore) -> Self {
		let mut registry = Self {
			store,
			instances: Vec::new(),
			introspector: Introspector::new(),
		};
		for reg in inventory::iter::<GeneratorReg> {
			registry.install((reg.build)());
		}
		registry
	}

	/// Installs one constructed generator, restoring and setting it up.
	///
	/// Exposed for hosts that register instances outside the `inventory`
	/// path (tests, dynamically configured hosts).
	pub fn install(&mut self, built: Result<Box<dyn Generator>, GeneratorError>) {
		let mut generator = match built {
			Ok(generator) => generator,
			Err(error) => {
				tracing::error!(%error, "generator construction failed; excluded from catalogue");
				return;
			}
		};

		let spec = generator.spec();
		let descriptors = self.introspector.analyze(spec.id, generator.properties());
		restore(&self.store, generator.as_mut(), &descriptors);
		generator.core_mut().mark_restored();

		if generator.core().enabled()
			&& let Err(error) = generator.setup(&mut self.store)
		{
			tracing::error!(
				generator = spec.id,
				%error,
				"generator setup failed; excluded from catalogue",
			);
			return;
		}

		self.instances.push(GeneratorInstance {
			generator,
			descriptors,
		});
	}

	/// Number of catalogued generators.
	pub fn factory_count(&self) -> usize {
		self.instances.len()
	}

	/// Bounds-checked access to one catalogued generator.
	pub fn factory(&self, index: usize) -> Option<FactoryInfo<'_>> {
		let instance = self.instances.get(index)?;
		Some(FactoryInfo {
			generator: instance.generator.as_ref(),
			properties: &instance.descriptors,
		})
	}

	/// Writes every live property value of every instance to the store and
	/// flushes.
	///
	/// Invoked on shutdown and after every successful apply.
	pub fn persist_all(&mut self) -> StoreResult<()> {
		for instance in &self.instances {
			let category = instance.generator.spec().id;
			for descriptor in instance.descriptors.iter() {
				let value = (descriptor.getter)(instance.generator.as_ref());
				self.store.set(
					property_key(category, descriptor.name),
					value,
					OverridePolicy::AlwaysOverwrite,
				);
			}
		}
		self.store.save()
	}

	/// Persists all state and consumes the registry.
	pub fn shutdown(mut self) -> StoreResult<()> {
		self.persist_all()
	}

	/// The underlying preference store.
	pub fn store(&self) -> &PrefStore {
		&self.store
	}

	/// Mutable access to the underlying preference store.
	pub fn store_mut(&mut self) -> &mut PrefStore {
		&mut self.store
	}

	/// Returns `true` if the action at `button` of generator `index` can
	/// currently be invoked.
	pub fn is_button_interactable(&self, index: usize, button: usize) -> bool {
		let Some(instance) = self.instances.get(index) else {
			return false;
		};
		instance
			.generator
			.buttons()
			.is_some_and(|ext| ext.is_button_interactable(button, &self.store))
	}

	/// Invokes the action at `button` of generator `index`, if present.
	pub fn click_button(&mut self, index: usize, button: usize) {
		let Some(instance) = self.instances.get_mut(index) else {
			return;
		};
		if let Some(ext) = instance.generator.buttons_mut() {
			ext.on_button_click(button, &mut self.store);
		}
	}
}

/// Applies persisted values to a freshly constructed instance.
///
/// A vacant key leaves the in-code default; a persisted value of the wrong
/// kind is reported and skipped, and restoration continues for the remaining
/// properties.
fn restore(store: &PrefStore, generator: &mut dyn Generator, descriptors: &[PropertyDescriptor]) {
	let category = generator.spec().id;
	for descriptor in descriptors {
		let key = property_key(category, descriptor.name);
		let Some(value) = store.get(&key) else {
			continue;
		};
		if !value.matches_kind(descriptor.kind) {
			tracing::warn!(
				generator = category,
				property = descriptor.name,
				expected = descriptor.kind.name(),
				got = value.kind().name(),
				"persisted value kind mismatch; keeping in-code default",
			);
			continue;
		}
		let value = value.clone();
		(descriptor.setter)(generator, value);
	}
}
