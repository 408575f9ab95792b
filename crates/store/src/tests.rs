use crate::{
	JsonFileBackend, OverridePolicy, PrefKey, PrefStore, PrefValue, StoreError,
};

fn key(name: &str) -> PrefKey {
	PrefKey::new("stencil.test", "Fixture", name)
}

#[test]
fn test_round_trip_all_kinds() {
	let mut store = PrefStore::in_memory();
	store.set(key("b"), true, OverridePolicy::AlwaysOverwrite);
	store.set(key("i"), 7i64, OverridePolicy::AlwaysOverwrite);
	store.set(key("f"), 1.5f64, OverridePolicy::AlwaysOverwrite);
	store.set(key("s"), "hello", OverridePolicy::AlwaysOverwrite);

	assert_eq!(store.get_as::<bool>(&key("b")).unwrap(), Some(true));
	assert_eq!(store.get_as::<i64>(&key("i")).unwrap(), Some(7));
	assert_eq!(store.get_as::<f64>(&key("f")).unwrap(), Some(1.5));
	assert_eq!(
		store.get_as::<String>(&key("s")).unwrap(),
		Some("hello".to_string())
	);
}

#[test]
fn test_overwrite_if_absent_seeds_but_never_clobbers() {
	let mut store = PrefStore::in_memory();
	store.set(key("v"), 1i64, OverridePolicy::OverwriteIfAbsent);
	store.set(key("v"), 2i64, OverridePolicy::OverwriteIfAbsent);
	assert_eq!(store.get(&key("v")), Some(&PrefValue::Int(1)));

	store.set(key("v"), 3i64, OverridePolicy::AlwaysOverwrite);
	assert_eq!(store.get(&key("v")), Some(&PrefValue::Int(3)));
}

#[test]
fn test_kind_mismatch_is_a_decode_failure() {
	let mut store = PrefStore::in_memory();
	store.set(key("v"), "not an int", OverridePolicy::AlwaysOverwrite);

	match store.get_as::<i64>(&key("v")) {
		Err(StoreError::KindMismatch { expected, got, .. }) => {
			assert_eq!(expected.name(), "int");
			assert_eq!(got.name(), "string");
		}
		other => panic!("expected kind mismatch, got {other:?}"),
	}
}

#[test]
fn test_vacant_key_is_none_not_error() {
	let store = PrefStore::in_memory();
	assert_eq!(store.get_as::<i64>(&key("missing")).unwrap(), None);
}

#[test]
fn test_delete_removes_value() {
	let mut store = PrefStore::in_memory();
	store.set(key("v"), true, OverridePolicy::AlwaysOverwrite);
	assert_eq!(store.delete(&key("v")), Some(PrefValue::Bool(true)));
	assert_eq!(store.get(&key("v")), None);
	assert!(store.is_empty());
}

#[test]
fn test_json_backend_survives_reopen() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("prefs.json");

	let mut store = PrefStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
	store.set(key("b"), false, OverridePolicy::AlwaysOverwrite);
	store.set(key("s"), "persisted", OverridePolicy::AlwaysOverwrite);
	store.set(key("f"), 0.25f64, OverridePolicy::AlwaysOverwrite);
	store.save().unwrap();

	let reopened = PrefStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
	assert_eq!(reopened.len(), 3);
	assert_eq!(reopened.get(&key("b")), Some(&PrefValue::Bool(false)));
	assert_eq!(
		reopened.get_as::<String>(&key("s")).unwrap(),
		Some("persisted".to_string())
	);
	assert_eq!(reopened.get_as::<f64>(&key("f")).unwrap(), Some(0.25));
}

#[test]
fn test_unsaved_mutations_are_not_durable() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("prefs.json");

	let mut store = PrefStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
	store.set(key("saved"), 1i64, OverridePolicy::AlwaysOverwrite);
	store.save().unwrap();
	store.set(key("lost"), 2i64, OverridePolicy::AlwaysOverwrite);

	let reopened = PrefStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
	assert_eq!(reopened.get(&key("saved")), Some(&PrefValue::Int(1)));
	assert_eq!(reopened.get(&key("lost")), None);
}

#[test]
fn test_missing_file_loads_empty() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("does-not-exist.json");
	let store = PrefStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
	assert!(store.is_empty());
}
