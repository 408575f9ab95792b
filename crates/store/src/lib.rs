//! Durable preference storage for Stencil.
//!
//! This crate provides the persistence layer the generator framework sits on:
//! a flat table of scalar values addressed by composite [`PrefKey`]s, held in
//! memory and flushed to a [`StoreBackend`] on explicit [`PrefStore::save`]
//! calls.
//!
//! # Keys
//!
//! A [`PrefKey`] is `{namespace, category, name}`. The namespace identifies
//! the owning subsystem, the category groups values (generator properties use
//! the generator's type id here), and the name addresses one value within the
//! category.
//!
//! # Values
//!
//! Values are a closed set of scalar kinds ([`PrefValue`]): bool, int, float,
//! and string. Reading a key through [`PrefStore::get_as`] with the wrong
//! type is a decode failure, never a silent default. Adding a kind means
//! extending the enum; every consumer matches exhaustively.
//!
//! # Durability
//!
//! Mutations stay in memory until [`PrefStore::save`] flushes them through
//! the backend. A failed flush is reported to the caller. The store performs
//! no background persistence; if the process exits without a save, edits
//! since the last flush are lost.
//!
//! The store never invokes foreign code while its table is borrowed, so a
//! `set` or `save` issued as a downstream side effect of applying a value
//! always observes the previous operation fully completed.

pub mod backend;
pub mod error;
pub mod key;
pub mod value;

mod store;

#[cfg(test)]
mod tests;

pub use backend::{JsonFileBackend, MemoryBackend, StoreBackend};
pub use error::{Result, StoreError};
pub use key::PrefKey;
pub use store::{OverridePolicy, PrefStore};
pub use value::{FromPrefValue, PrefKind, PrefValue};
