//! Static property declaration and descriptors.
//!
//! Generator types declare their configurable state as a static
//! [`PropertyDecl`] table instead of being reflected over at runtime. The
//! introspector filters these declarations down to [`PropertyDescriptor`]s:
//! only entries with both accessors and a supported scalar kind survive.

use std::any::Any;

use stencil_store::{PrefKind, PrefValue};

use crate::generator::Generator;

/// Reads a property value out of a live generator.
pub type PropertyGetter = fn(&dyn Generator) -> PrefValue;

/// Writes a property value into a live generator. Values of a kind other
/// than the declared one are ignored; callers validate the kind first.
pub type PropertySetter = fn(&mut dyn Generator, PrefValue);

/// Display affixes for a string property's editor field.
#[derive(Debug, Clone, Copy)]
pub struct StringDecorator {
	/// Text rendered before the input field.
	pub prefix: Option<&'static str>,
	/// Text rendered after the input field.
	pub suffix: Option<&'static str>,
}

/// One statically declared property of a generator type.
#[derive(Clone, Copy)]
pub struct PropertyDecl {
	/// Property name; also the persisted key name.
	pub name: &'static str,
	/// Declared scalar kind.
	pub kind: PrefKind,
	/// Optional hover text for the editor.
	pub tooltip: Option<&'static str>,
	/// Optional display affixes (string properties only).
	pub decorator: Option<StringDecorator>,
	/// Read accessor. Declarations without one are skipped by analysis.
	pub getter: Option<PropertyGetter>,
	/// Write accessor. Declarations without one are skipped by analysis.
	pub setter: Option<PropertySetter>,
}

/// An analyzed, immutable property descriptor with both accessors present.
#[derive(Clone, Copy)]
pub struct PropertyDescriptor {
	/// Property name; also the persisted key name.
	pub name: &'static str,
	/// Scalar kind of the property's value.
	pub kind: PrefKind,
	/// Optional hover text for the editor.
	pub tooltip: Option<&'static str>,
	/// Optional display affixes.
	pub decorator: Option<StringDecorator>,
	/// Read accessor.
	pub getter: PropertyGetter,
	/// Write accessor.
	pub setter: PropertySetter,
}

impl std::fmt::Debug for PropertyDescriptor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PropertyDescriptor")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.finish()
	}
}

/// The framework-level enabled flag, present on every generator.
///
/// Analyzed after the generator's own declarations, so it lands first in the
/// final descriptor order.
pub static ENABLED_DECL: PropertyDecl = PropertyDecl {
	name: "Enabled",
	kind: PrefKind::Bool,
	tooltip: Some("Whether this generator is active. Disabled generators are not set up."),
	decorator: None,
	getter: Some(|g| PrefValue::Bool(g.core().enabled())),
	setter: Some(|g, v| {
		if let PrefValue::Bool(state) = v {
			g.set_enabled(state);
		}
	}),
};

/// Downcasts a generator to its concrete type inside a property accessor.
///
/// Accessors are only ever invoked with the instance they were declared for;
/// the descriptor table and the instance share a type by construction.
pub fn downcast<T: Generator>(generator: &dyn Generator) -> &T {
	(generator as &dyn Any)
		.downcast_ref::<T>()
		.expect("property accessor invoked with a different generator type")
}

/// Mutable counterpart of [`downcast`].
pub fn downcast_mut<T: Generator>(generator: &mut dyn Generator) -> &mut T {
	(generator as &mut dyn Any)
		.downcast_mut::<T>()
		.expect("property accessor invoked with a different generator type")
}
