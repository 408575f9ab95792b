use std::fmt;

use serde::{Deserialize, Serialize};

/// A persisted scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PrefValue {
	/// Boolean value (true/false).
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating-point value.
	Float(f64),
	/// String value.
	String(String),
}

impl PrefValue {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			PrefValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			PrefValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value if this is a `Float` variant.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			PrefValue::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			PrefValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the kind of this value.
	pub fn kind(&self) -> PrefKind {
		match self {
			PrefValue::Bool(_) => PrefKind::Bool,
			PrefValue::Int(_) => PrefKind::Int,
			PrefValue::Float(_) => PrefKind::Float,
			PrefValue::String(_) => PrefKind::String,
		}
	}

	/// Returns true if this value matches the given kind.
	pub fn matches_kind(&self, kind: PrefKind) -> bool {
		self.kind() == kind
	}
}

impl From<bool> for PrefValue {
	fn from(v: bool) -> Self {
		PrefValue::Bool(v)
	}
}

impl From<i64> for PrefValue {
	fn from(v: i64) -> Self {
		PrefValue::Int(v)
	}
}

impl From<f64> for PrefValue {
	fn from(v: f64) -> Self {
		PrefValue::Float(v)
	}
}

impl From<String> for PrefValue {
	fn from(v: String) -> Self {
		PrefValue::String(v)
	}
}

impl From<&str> for PrefValue {
	fn from(v: &str) -> Self {
		PrefValue::String(v.to_string())
	}
}

/// The kind of a persisted scalar value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKind {
	/// Boolean kind.
	Bool,
	/// Integer kind.
	Int,
	/// Floating-point kind.
	Float,
	/// String kind.
	String,
}

impl PrefKind {
	/// Returns the lowercase name of this kind.
	pub fn name(self) -> &'static str {
		match self {
			PrefKind::Bool => "bool",
			PrefKind::Int => "int",
			PrefKind::Float => "float",
			PrefKind::String => "string",
		}
	}
}

impl fmt::Display for PrefKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

// Seal the FromPrefValue trait to prevent external implementations.
mod sealed {
	pub trait Sealed {}
	impl Sealed for bool {}
	impl Sealed for i64 {}
	impl Sealed for f64 {}
	impl Sealed for String {}
}

/// Trait for types that can be extracted from a [`PrefValue`].
pub trait FromPrefValue: sealed::Sealed + Sized {
	/// Extracts the value, returning `None` if the kind doesn't match.
	fn from_pref(value: &PrefValue) -> Option<Self>;

	/// Returns the [`PrefKind`] corresponding to this Rust type.
	fn pref_kind() -> PrefKind;
}

impl FromPrefValue for bool {
	fn from_pref(value: &PrefValue) -> Option<Self> {
		value.as_bool()
	}

	fn pref_kind() -> PrefKind {
		PrefKind::Bool
	}
}

impl FromPrefValue for i64 {
	fn from_pref(value: &PrefValue) -> Option<Self> {
		value.as_int()
	}

	fn pref_kind() -> PrefKind {
		PrefKind::Int
	}
}

impl FromPrefValue for f64 {
	fn from_pref(value: &PrefValue) -> Option<Self> {
		value.as_float()
	}

	fn pref_kind() -> PrefKind {
		PrefKind::Float
	}
}

impl FromPrefValue for String {
	fn from_pref(value: &PrefValue) -> Option<Self> {
		value.as_str().map(|s| s.to_string())
	}

	fn pref_kind() -> PrefKind {
		PrefKind::String
	}
}
