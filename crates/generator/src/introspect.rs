//! Property analysis with a per-type cache.

use std::collections::HashMap;
use std::sync::Arc;

use crate::property::{ENABLED_DECL, PropertyDecl, PropertyDescriptor};

/// Turns static property declarations into cached descriptor lists.
///
/// Analysis runs at most once per generator type id; repeated calls return
/// the cached list without re-analysis. The registry analyzes every type
/// during its single-threaded load phase, so the cache is fully populated
/// before any concurrent access could occur.
#[derive(Default)]
pub struct Introspector {
	cache: HashMap<&'static str, Arc<[PropertyDescriptor]>>,
}

impl Introspector {
	/// Creates an empty introspector.
	pub fn new() -> Self {
		Self::default()
	}

	/// Analyzes the declarations for the type identified by `id`.
	///
	/// Declarations lacking either accessor are silently skipped; that is a
	/// filtering policy, not an error. Surviving entries are prepended as
	/// found, so the final list is in reverse declaration order, with the
	/// framework-level `Enabled` property first.
	pub fn analyze(
		&mut self,
		id: &'static str,
		decls: &'static [PropertyDecl],
	) -> Arc<[PropertyDescriptor]> {
		if let Some(cached) = self.cache.get(id) {
			return cached.clone();
		}

		let mut list: Vec<PropertyDescriptor> = Vec::with_capacity(decls.len() + 1);
		for decl in decls.iter().chain(std::iter::once(&ENABLED_DECL)) {
			let (Some(getter), Some(setter)) = (decl.getter, decl.setter) else {
				continue;
			};
			list.insert(
				0,
				PropertyDescriptor {
					name: decl.name,
					kind: decl.kind,
					tooltip: decl.tooltip,
					decorator: decl.decorator,
					getter,
					setter,
				},
			);
		}

		let descriptors: Arc<[PropertyDescriptor]> = list.into();
		self.cache.insert(id, descriptors.clone());
		descriptors
	}

	/// Returns the cached descriptor list for `id`, if analyzed.
	pub fn cached(&self, id: &str) -> Option<Arc<[PropertyDescriptor]>> {
		self.cache.get(id).cloned()
	}
}
