//! Generator capability traits.

use std::any::Any;

use stencil_store::PrefStore;

use crate::error::GeneratorError;
use crate::property::PropertyDecl;

/// Static metadata identifying a generator type.
///
/// The `id` doubles as the grouping category for persisted property values,
/// so it must be unique across all registered generators.
pub struct GeneratorSpec {
	/// Unique type id, e.g. `"stencil-tags::tag_enum"`.
	pub id: &'static str,
	/// Human-readable name for list displays.
	pub name: &'static str,
	/// Short description of what the generator emits.
	pub description: &'static str,
}

/// Framework-managed state embedded in every generator.
#[derive(Debug, Default)]
pub struct GeneratorCore {
	enabled: bool,
	restored: bool,
}

impl GeneratorCore {
	/// Creates a core in the disabled, not-yet-restored state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` if the generator is enabled.
	pub fn enabled(&self) -> bool {
		self.enabled
	}

	/// Returns `true` once persisted values have been applied.
	pub fn is_restored(&self) -> bool {
		self.restored
	}

	/// Marks the generator restored. Called by the registry after all
	/// persisted property values have been applied.
	pub fn mark_restored(&mut self) {
		self.restored = true;
	}

	/// Writes the enabled flag without firing transition hooks.
	pub fn set_enabled_raw(&mut self, state: bool) {
		self.enabled = state;
	}
}

/// A pluggable unit of configurable behavior that produces an artifact on
/// demand.
///
/// Implementors embed a [`GeneratorCore`] and expose it through
/// [`Generator::core`]/[`Generator::core_mut`]; the enabled transition logic
/// lives in the provided [`Generator::set_enabled`].
pub trait Generator: Any {
	/// Static metadata for this generator type.
	fn spec(&self) -> &'static GeneratorSpec;

	/// Framework-managed state.
	fn core(&self) -> &GeneratorCore;

	/// Framework-managed state, mutable.
	fn core_mut(&mut self) -> &mut GeneratorCore;

	/// Static declaration of this type's configurable properties.
	///
	/// The framework-level `Enabled` property is added by the introspector;
	/// only generator-specific properties belong here.
	fn properties(&self) -> &'static [PropertyDecl] {
		&[]
	}

	/// Invoked once after restoration when the generator is enabled.
	fn setup(&mut self, _store: &mut PrefStore) -> Result<(), GeneratorError> {
		Ok(())
	}

	/// Invoked after a batch of property writes has been applied.
	fn on_apply(&mut self, _store: &mut PrefStore) {}

	/// Invoked when the enabled flag transitions to `true`.
	fn on_enabled(&mut self) {}

	/// Invoked when the enabled flag transitions to `false`.
	fn on_disabled(&mut self) {}

	/// Flips the enabled flag, firing the transition hook on actual change.
	fn set_enabled(&mut self, state: bool) {
		if state == self.core().enabled() {
			return;
		}
		self.core_mut().set_enabled_raw(state);
		if state {
			self.on_enabled();
		} else {
			self.on_disabled();
		}
	}

	/// The optional labeled-action extension, if this generator has one.
	fn buttons(&self) -> Option<&dyn GeneratorButtons> {
		None
	}

	/// Mutable access to the labeled-action extension.
	fn buttons_mut(&mut self) -> Option<&mut dyn GeneratorButtons> {
		None
	}
}

/// Label and tooltip for one generator-provided action.
#[derive(Debug, Clone, Copy)]
pub struct ButtonLabel {
	/// Button caption.
	pub label: &'static str,
	/// Optional hover text.
	pub tooltip: Option<&'static str>,
}

/// Optional capability: a set of labeled actions the host surfaces as
/// buttons without knowing their semantics.
pub trait GeneratorButtons {
	/// The labels of all actions, in display order.
	fn button_labels(&self) -> &'static [ButtonLabel];

	/// Returns `true` if the action at `index` can currently be invoked.
	fn is_button_interactable(&self, index: usize, store: &PrefStore) -> bool;

	/// Invokes the action at `index`. Out-of-range indices are ignored.
	fn on_button_click(&mut self, index: usize, store: &mut PrefStore);
}
