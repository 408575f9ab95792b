//! Error types for the preference store.

use std::path::PathBuf;

use thiserror::Error;

use crate::key::PrefKey;
use crate::value::PrefKind;

/// Errors that can occur when accessing or flushing the store.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Error reading or writing the backing file.
	#[error("I/O error accessing {path}: {error}")]
	Io {
		/// Path to the file that failed.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The store contents could not be encoded for persistence.
	#[error("failed to encode store contents: {0}")]
	Encode(#[source] serde_json::Error),

	/// The backing file could not be decoded.
	#[error("failed to decode store contents of {path}: {error}")]
	Decode {
		/// Path to the file that failed to decode.
		path: PathBuf,
		/// The underlying decode error.
		error: serde_json::Error,
	},

	/// A stored value's kind does not match the requested type.
	#[error("stored value for {key} is {got}, expected {expected}")]
	KindMismatch {
		/// The key that was read.
		key: PrefKey,
		/// The kind the caller asked for.
		expected: PrefKind,
		/// The kind actually stored.
		got: PrefKind,
	},
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
