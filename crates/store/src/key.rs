use std::fmt;

use serde::{Deserialize, Serialize};

/// Composite key addressing one persisted scalar value.
///
/// No two distinct owners may collide on a full key; callers derive keys so
/// that the (category, name) pair is unique within their namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrefKey {
	/// Subsystem that owns the value.
	pub namespace: String,
	/// Grouping within the namespace (e.g. a generator's type id).
	pub category: String,
	/// Name of the value within the category.
	pub name: String,
}

impl PrefKey {
	/// Creates a new key from its three components.
	pub fn new(
		namespace: impl Into<String>,
		category: impl Into<String>,
		name: impl Into<String>,
	) -> Self {
		Self {
			namespace: namespace.into(),
			category: category.into(),
			name: name.into(),
		}
	}
}

impl fmt::Display for PrefKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}/{}", self.namespace, self.category, self.name)
	}
}
