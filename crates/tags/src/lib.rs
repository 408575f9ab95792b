//! Tag bitmask enum generation.
//!
//! [`TagEnumGenerator`] turns the project's tag table (a newline-delimited
//! list at a configurable source path) into a generated Rust enum whose
//! members carry bitmask values. A snapshot of the last-seen tag list is kept
//! in the preference store so unchanged inputs skip regeneration and the
//! rebuild it would trigger.
//!
//! Generation is exposed through the generator's `on_apply` hook and through
//! its button extension ("Generate and enable tags" / "Disable tags"), which
//! also toggles the conditional-compilation symbol guarding consumers of the
//! generated enum (see [`symbols`]).

pub mod result;
pub mod symbols;

mod generator;


pub use generator::{SNAPSHOT_NAMESPACE, TAGS_SYMBOL, TagEnumGenerator};
pub use result::{GenerationResult, GenerationState};
