//! Transactional property editing over one selected generator.

use stencil_store::{OverridePolicy, PrefValue};

use crate::error::{ApplyError, SessionError};
use crate::registry::{Registry, property_key};

/// Single-selection editing surface with apply/revert semantics.
///
/// On selection the session snapshots the generator's current property
/// values; edits land in the snapshot and set the dirty flag. `apply` pushes
/// changed values into the live instance and the store; `revert` reloads the
/// live values. Selecting a different generator while dirty is rejected with
/// [`SessionError::DirtyPending`] until the caller resolves via
/// [`EditSession::select_applying`] or [`EditSession::select_discarding`];
/// at most one generator can be dirty at a time.
#[derive(Debug, Default)]
pub struct EditSession {
	selected: Option<usize>,
	values: Vec<PrefValue>,
	dirty: bool,
}

impl EditSession {
	/// Creates a session with no selection.
	pub fn new() -> Self {
		Self::default()
	}

	/// Index of the selected generator, if any.
	pub fn selected(&self) -> Option<usize> {
		self.selected
	}

	/// Returns `true` if the snapshot holds unapplied edits.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Number of property slots in the current snapshot.
	pub fn slot_count(&self) -> usize {
		self.values.len()
	}

	/// Selects the generator at `index` and snapshots its current values.
	///
	/// Reselecting the current index is a no-op. Selecting a different index
	/// while dirty fails with [`SessionError::DirtyPending`].
	pub fn select(&mut self, registry: &Registry, index: usize) -> Result<(), SessionError> {
		if self.selected == Some(index) {
			return Ok(());
		}
		if self.dirty {
			return Err(SessionError::DirtyPending);
		}
		let info = registry
			.factory(index)
			.ok_or(SessionError::OutOfRange(index))?;
		self.values = info
			.properties
			.iter()
			.map(|descriptor| (descriptor.getter)(info.generator))
			.collect();
		self.selected = Some(index);
		Ok(())
	}

	/// Resolves a dirty selection by applying first, then selects `index`.
	pub fn select_applying(
		&mut self,
		registry: &mut Registry,
		index: usize,
	) -> Result<Vec<ApplyError>, SessionError> {
		let errors = if self.dirty {
			self.apply(registry)?
		} else {
			Vec::new()
		};
		self.select(registry, index)?;
		Ok(errors)
	}

	/// Resolves a dirty selection by discarding edits, then selects `index`.
	pub fn select_discarding(
		&mut self,
		registry: &Registry,
		index: usize,
	) -> Result<(), SessionError> {
		self.dirty = false;
		self.select(registry, index)
	}

	/// The snapshot value in `slot`, if present.
	pub fn value(&self, slot: usize) -> Option<&PrefValue> {
		self.values.get(slot)
	}

	/// Writes an edited value into `slot`, marking the session dirty when the
	/// value actually changed.
	///
	/// Slots are host-owned scratch; kind agreement with the descriptor is
	/// checked at apply time.
	pub fn set_value(&mut self, slot: usize, value: PrefValue) -> Result<(), SessionError> {
		if self.selected.is_none() {
			return Err(SessionError::NoSelection);
		}
		let current = self
			.values
			.get_mut(slot)
			.ok_or(SessionError::SlotOutOfRange(slot))?;
		if *current != value {
			*current = value;
			self.dirty = true;
		}
		Ok(())
	}

	/// Pushes changed snapshot values into the live instance and the store.
	///
	/// A clean session is a no-op; the hook does not fire.
	///
	/// Commits best-effort: a slot whose value no longer matches its
	/// descriptor's kind is reported in the returned list and skipped, and
	/// the remaining slots still commit. Afterwards the dirty flag clears,
	/// all state is persisted, and the generator's `on_apply` hook runs
	/// exactly once.
	pub fn apply(&mut self, registry: &mut Registry) -> Result<Vec<ApplyError>, SessionError> {
		let index = self.selected.ok_or(SessionError::NoSelection)?;
		if !self.dirty {
			return Ok(Vec::new());
		}
		let instance = registry
			.instances
			.get_mut(index)
			.ok_or(SessionError::OutOfRange(index))?;
		let category = instance.generator.spec().id;
		let descriptors = instance.descriptors.clone();

		let mut errors = Vec::new();
		for (slot, descriptor) in descriptors.iter().enumerate() {
			let edited = &self.values[slot];
			let live = (descriptor.getter)(instance.generator.as_ref());
			if *edited == live {
				continue;
			}
			if !edited.matches_kind(descriptor.kind) {
				let error = ApplyError {
					generator: category,
					property: descriptor.name,
					expected: descriptor.kind,
					got: edited.kind(),
				};
				tracing::error!(%error, "skipping property during apply");
				errors.push(error);
				continue;
			}
			(descriptor.setter)(instance.generator.as_mut(), edited.clone());
			registry.store.set(
				property_key(category, descriptor.name),
				edited.clone(),
				OverridePolicy::AlwaysOverwrite,
			);
		}

		self.dirty = false;
		registry.persist_all()?;

		let instance = registry
			.instances
			.get_mut(index)
			.ok_or(SessionError::OutOfRange(index))?;
		let generator = instance.generator.as_mut();
		generator.on_apply(&mut registry.store);

		// Re-snapshot so the session reflects any values the hook adjusted.
		let instance = &registry.instances[index];
		self.values = instance
			.descriptors
			.iter()
			.map(|descriptor| (descriptor.getter)(instance.generator.as_ref()))
			.collect();

		Ok(errors)
	}

	/// Discards the snapshot and reloads the generator's live values.
	pub fn revert(&mut self, registry: &Registry) -> Result<(), SessionError> {
		let index = self.selected.ok_or(SessionError::NoSelection)?;
		let info = registry
			.factory(index)
			.ok_or(SessionError::OutOfRange(index))?;
		self.values = info
			.properties
			.iter()
			.map(|descriptor| (descriptor.getter)(info.generator))
			.collect();
		self.dirty = false;
		Ok(())
	}
}
