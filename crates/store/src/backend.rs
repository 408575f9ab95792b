//! Persistence backends for the preference store.
//!
//! A backend owns the durable medium; the [`PrefStore`](crate::PrefStore)
//! owns the in-memory table and decides when to flush. Any key-value medium
//! satisfying [`StoreBackend`] can back a store.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::key::PrefKey;
use crate::value::PrefValue;

/// A durable medium for the preference table.
pub trait StoreBackend {
	/// Loads the persisted table, or an empty table if nothing was persisted.
	fn load(&mut self) -> Result<IndexMap<PrefKey, PrefValue>>;

	/// Persists the given table. All entries must be durable on normal return.
	fn persist(&mut self, table: &IndexMap<PrefKey, PrefValue>) -> Result<()>;
}

/// One persisted entry in the JSON file format.
#[derive(Serialize, Deserialize)]
struct StoredEntry {
	#[serde(flatten)]
	key: PrefKey,
	#[serde(flatten)]
	value: PrefValue,
}

/// File-backed store using a JSON entry list.
///
/// Entries serialize in table insertion order, so repeated saves of the same
/// table produce identical files.
#[derive(Debug)]
pub struct JsonFileBackend {
	path: PathBuf,
}

impl JsonFileBackend {
	/// Creates a backend for the given file path. The file need not exist yet.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Returns the path of the backing file.
	pub fn path(&self) -> &PathBuf {
		&self.path
	}
}

impl StoreBackend for JsonFileBackend {
	fn load(&mut self) -> Result<IndexMap<PrefKey, PrefValue>> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}
		let content = std::fs::read_to_string(&self.path).map_err(|error| StoreError::Io {
			path: self.path.clone(),
			error,
		})?;
		let entries: Vec<StoredEntry> =
			serde_json::from_str(&content).map_err(|error| StoreError::Decode {
				path: self.path.clone(),
				error,
			})?;
		Ok(entries.into_iter().map(|e| (e.key, e.value)).collect())
	}

	fn persist(&mut self, table: &IndexMap<PrefKey, PrefValue>) -> Result<()> {
		let entries: Vec<StoredEntry> = table
			.iter()
			.map(|(key, value)| StoredEntry {
				key: key.clone(),
				value: value.clone(),
			})
			.collect();

		// Open, write fully, flush, release; the handle is dropped even if a
		// write fails partway.
		let mut file = File::create(&self.path).map_err(|error| StoreError::Io {
			path: self.path.clone(),
			error,
		})?;
		serde_json::to_writer_pretty(&mut file, &entries).map_err(StoreError::Encode)?;
		file.flush().map_err(|error| StoreError::Io {
			path: self.path.clone(),
			error,
		})
	}
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
	table: IndexMap<PrefKey, PrefValue>,
}

impl MemoryBackend {
	/// Creates an empty in-memory backend.
	pub fn new() -> Self {
		Self::default()
	}
}

impl StoreBackend for MemoryBackend {
	fn load(&mut self) -> Result<IndexMap<PrefKey, PrefValue>> {
		Ok(self.table.clone())
	}

	fn persist(&mut self, table: &IndexMap<PrefKey, PrefValue>) -> Result<()> {
		self.table = table.clone();
		Ok(())
	}
}
