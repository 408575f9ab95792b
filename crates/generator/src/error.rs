//! Error types for the generator framework.

use thiserror::Error;

use stencil_store::{PrefKind, StoreError};

/// Error raised by a generator's own hooks (construction, setup).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GeneratorError {
	/// Human-readable failure description.
	pub message: String,
}

impl GeneratorError {
	/// Creates a new error from a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

/// A single property that failed to commit during an apply.
///
/// The remaining properties of the batch still commit; this is a diagnostic,
/// not an abort.
#[derive(Debug, Clone, Error)]
#[error("could not apply value of kind {got} to {generator}::{property} (expected {expected})")]
pub struct ApplyError {
	/// Type id of the generator being edited.
	pub generator: &'static str,
	/// Name of the offending property.
	pub property: &'static str,
	/// The property's declared kind.
	pub expected: PrefKind,
	/// The kind of the edited value.
	pub got: PrefKind,
}

/// Errors surfaced by the edit session's state machine.
#[derive(Debug, Error)]
pub enum SessionError {
	/// An operation required a selection but none is active.
	#[error("no generator selected")]
	NoSelection,

	/// The requested generator index is outside the catalogue.
	#[error("generator index {0} is out of range")]
	OutOfRange(usize),

	/// The requested property slot does not exist for the selection.
	#[error("property slot {0} is out of range")]
	SlotOutOfRange(usize),

	/// Unsaved edits block selecting a different generator. Resolve with
	/// [`EditSession::select_applying`](crate::EditSession::select_applying)
	/// or [`EditSession::select_discarding`](crate::EditSession::select_discarding).
	#[error("unsaved changes pending; apply or discard before selecting another generator")]
	DirtyPending,

	/// The store failed to flush.
	#[error(transparent)]
	Store(#[from] StoreError),
}
