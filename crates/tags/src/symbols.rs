//! Conditional-compilation symbol management.
//!
//! Symbols gate consumers of generated artifacts: code referencing the
//! generated enum compiles only while the corresponding symbol is defined.
//! The set is persisted in the preference store as a `;`-joined string per
//! target, mirroring how build configurations carry define lists.

use std::sync::LazyLock;

use regex::Regex;

use stencil_store::{OverridePolicy, PrefKey, PrefStore, Result as StoreResult};

/// Namespace under which symbol sets are persisted.
pub const SYMBOL_NAMESPACE: &str = "stencil.symbols";

/// Target used when the caller does not name one.
pub const DEFAULT_TARGET: &str = "default";

static VALID_SYMBOL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new("^[A-Za-z_][A-Za-z0-9_]+$").expect("valid symbol pattern"));

fn symbol_key(target: &str) -> PrefKey {
	PrefKey::new(SYMBOL_NAMESPACE, target, "defines")
}

fn load_set(store: &PrefStore, target: &str) -> Vec<String> {
	let Some(joined) = store.get(&symbol_key(target)).and_then(|v| v.as_str().map(str::to_string))
	else {
		return Vec::new();
	};
	joined
		.split(';')
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.collect()
}

fn store_set(store: &mut PrefStore, target: &str, set: &[String]) -> StoreResult<()> {
	store.set(
		symbol_key(target),
		set.join(";"),
		OverridePolicy::AlwaysOverwrite,
	);
	store.save()
}

/// Returns `true` if `symbol` is usable as a define name.
pub fn is_valid_symbol(symbol: &str) -> bool {
	VALID_SYMBOL.is_match(symbol)
}

/// Returns `true` if `symbol` is defined for `target`.
pub fn has_symbol(store: &PrefStore, target: &str, symbol: &str) -> bool {
	is_valid_symbol(symbol) && load_set(store, target).iter().any(|s| s == symbol)
}

/// Defines `symbol` for `target`. Returns `true` if the set changed.
pub fn add_symbol(store: &mut PrefStore, target: &str, symbol: &str) -> StoreResult<bool> {
	if !is_valid_symbol(symbol) {
		return Ok(false);
	}
	let mut set = load_set(store, target);
	if set.iter().any(|s| s == symbol) {
		return Ok(false);
	}
	set.push(symbol.to_string());
	store_set(store, target, &set)?;
	Ok(true)
}

/// Removes `symbol` from `target`. Returns `true` if the set changed.
pub fn remove_symbol(store: &mut PrefStore, target: &str, symbol: &str) -> StoreResult<bool> {
	let mut set = load_set(store, target);
	let before = set.len();
	set.retain(|s| s != symbol);
	if set.len() == before {
		return Ok(false);
	}
	store_set(store, target, &set)?;
	Ok(true)
}
