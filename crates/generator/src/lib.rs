//! Generator framework for Stencil.
//!
//! Generators are independently-authored plugins that emit generated source
//! artifacts. This crate provides the host-side machinery around them:
//!
//! - **Capability traits**: [`Generator`] (enabled lifecycle, setup and
//!   apply hooks, a static property table) and the optional
//!   [`GeneratorButtons`] extension for labeled actions.
//! - **Introspection**: each generator type statically declares its
//!   configurable properties; the [`Introspector`] filters and caches the
//!   resulting descriptor list once per type.
//! - **Registry**: the [`Registry`] discovers registered generators,
//!   restores their persisted property values before first use, and owns the
//!   persist-on-shutdown lifecycle.
//! - **Edit sessions**: [`EditSession`] is a transactional, single-selection
//!   editing surface with a dirty flag and apply/revert semantics.
//!
//! # Lifecycle
//!
//! The host calls [`Registry::load`] once after startup and
//! [`Registry::shutdown`] once before teardown. There is no ambient
//! singleton; the returned handle is passed to whichever component needs it.
//! Edits made after the last persist are lost if shutdown is skipped; this
//! window is accepted, not mitigated.
//!
//! # Registration
//!
//! Generator crates submit a constructor via `inventory`:
//!
//! ```ignore
//! inventory::submit! {
//! 	GeneratorReg::new(|| Ok(Box::new(MyGenerator::new())))
//! }
//! ```

pub mod error;
pub mod generator;
pub mod introspect;
pub mod property;
pub mod registry;
pub mod session;

#[cfg(test)]
mod tests;

pub use error::{ApplyError, GeneratorError, SessionError};
pub use generator::{ButtonLabel, Generator, GeneratorButtons, GeneratorCore, GeneratorSpec};
pub use introspect::Introspector;
pub use property::{
	ENABLED_DECL, PropertyDecl, PropertyDescriptor, PropertyGetter, PropertySetter,
	StringDecorator, downcast, downcast_mut,
};
pub use registry::{FactoryInfo, GeneratorReg, PROPERTY_NAMESPACE, Registry, property_key};
pub use session::EditSession;
