use indexmap::IndexMap;

use crate::backend::{MemoryBackend, StoreBackend};
use crate::error::{Result, StoreError};
use crate::key::PrefKey;
use crate::value::{FromPrefValue, PrefValue};

/// Policy applied when a `set` targets a key that already holds a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverridePolicy {
	/// Write only if the key is vacant; existing values are left untouched.
	/// Used to seed defaults without clobbering user edits.
	OverwriteIfAbsent,
	/// Write unconditionally.
	AlwaysOverwrite,
}

/// In-memory preference table with explicit flushing through a backend.
pub struct PrefStore {
	backend: Box<dyn StoreBackend>,
	table: IndexMap<PrefKey, PrefValue>,
}

impl PrefStore {
	/// Opens a store over the given backend, loading any persisted contents.
	pub fn open(mut backend: Box<dyn StoreBackend>) -> Result<Self> {
		let table = backend.load()?;
		Ok(Self { backend, table })
	}

	/// Creates an empty store over an in-memory backend.
	pub fn in_memory() -> Self {
		Self {
			backend: Box::new(MemoryBackend::new()),
			table: IndexMap::new(),
		}
	}

	/// Returns the raw value held under `key`, if any.
	pub fn get(&self, key: &PrefKey) -> Option<&PrefValue> {
		self.table.get(key)
	}

	/// Returns the value held under `key` decoded as `T`.
	///
	/// A vacant key yields `Ok(None)`. A stored value of a different kind is
	/// a decode failure, not a silent default.
	pub fn get_as<T: FromPrefValue>(&self, key: &PrefKey) -> Result<Option<T>> {
		let Some(value) = self.table.get(key) else {
			return Ok(None);
		};
		match T::from_pref(value) {
			Some(decoded) => Ok(Some(decoded)),
			None => Err(StoreError::KindMismatch {
				key: key.clone(),
				expected: T::pref_kind(),
				got: value.kind(),
			}),
		}
	}

	/// Writes `value` under `key` according to `policy`.
	///
	/// With [`OverridePolicy::OverwriteIfAbsent`] this is a no-op when the key
	/// already holds a value.
	pub fn set(&mut self, key: PrefKey, value: impl Into<PrefValue>, policy: OverridePolicy) {
		match policy {
			OverridePolicy::OverwriteIfAbsent => {
				self.table.entry(key).or_insert_with(|| value.into());
			}
			OverridePolicy::AlwaysOverwrite => {
				self.table.insert(key, value.into());
			}
		}
	}

	/// Removes the value held under `key`, returning it if present.
	pub fn delete(&mut self, key: &PrefKey) -> Option<PrefValue> {
		self.table.shift_remove(key)
	}

	/// Flushes the table through the backend.
	///
	/// All `set` calls since the last save are durable on normal return.
	pub fn save(&mut self) -> Result<()> {
		self.backend.persist(&self.table)
	}

	/// Returns the number of stored values.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	/// Returns `true` if the store holds no values.
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Returns an iterator over all stored entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&PrefKey, &PrefValue)> {
		self.table.iter()
	}
}

impl std::fmt::Debug for PrefStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PrefStore")
			.field("entries", &self.table.len())
			.finish()
	}
}
