use stencil_store::{OverridePolicy, PrefKind, PrefStore, PrefValue};

use crate::error::{GeneratorError, SessionError};
use crate::generator::{Generator, GeneratorCore, GeneratorSpec};
use crate::introspect::Introspector;
use crate::property::{PropertyDecl, downcast, downcast_mut};
use crate::registry::{Registry, property_key};
use crate::session::EditSession;

static SPEC: GeneratorSpec = GeneratorSpec {
	id: "stencil-generator::test_counter",
	name: "Test counter",
	description: "Fixture generator for framework tests.",
};

static PROPERTIES: &[PropertyDecl] = &[
	PropertyDecl {
		name: "Threshold",
		kind: PrefKind::Int,
		tooltip: Some("Fixture threshold."),
		decorator: None,
		getter: Some(|g| downcast::<Counter>(g).threshold.into()),
		setter: Some(|g, v| {
			if let PrefValue::Int(v) = v {
				downcast_mut::<Counter>(g).threshold = v;
			}
		}),
	},
	PropertyDecl {
		name: "Label",
		kind: PrefKind::String,
		tooltip: None,
		decorator: None,
		getter: Some(|g| downcast::<Counter>(g).label.clone().into()),
		setter: Some(|g, v| {
			if let PrefValue::String(v) = v {
				downcast_mut::<Counter>(g).label = v;
			}
		}),
	},
	// No setter; analysis must skip this entry.
	PropertyDecl {
		name: "ReadOnly",
		kind: PrefKind::Bool,
		tooltip: None,
		decorator: None,
		getter: Some(|_| PrefValue::Bool(true)),
		setter: None,
	},
];

#[derive(Default)]
struct Counter {
	core: GeneratorCore,
	threshold: i64,
	label: String,
	setup_calls: u32,
	apply_calls: u32,
	enabled_transitions: u32,
	fail_setup: bool,
}

impl Generator for Counter {
	fn spec(&self) -> &'static GeneratorSpec {
		&SPEC
	}

	fn core(&self) -> &GeneratorCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut GeneratorCore {
		&mut self.core
	}

	fn properties(&self) -> &'static [PropertyDecl] {
		PROPERTIES
	}

	fn setup(&mut self, _store: &mut PrefStore) -> Result<(), GeneratorError> {
		if self.fail_setup {
			return Err(GeneratorError::new("fixture setup failure"));
		}
		self.setup_calls += 1;
		Ok(())
	}

	fn on_apply(&mut self, _store: &mut PrefStore) {
		self.apply_calls += 1;
	}

	fn on_enabled(&mut self) {
		self.enabled_transitions += 1;
	}
}

fn counter_at(registry: &Registry, index: usize) -> &Counter {
	downcast::<Counter>(registry.factory(index).unwrap().generator)
}

#[test]
fn test_analysis_is_idempotent_and_reverse_declaration_ordered() {
	let mut introspector = Introspector::new();
	let first = introspector.analyze(SPEC.id, PROPERTIES);
	let second = introspector.analyze(SPEC.id, PROPERTIES);

	let names: Vec<&str> = first.iter().map(|d| d.name).collect();
	// Prepend-as-found: reverse declaration order, framework Enabled first,
	// accessor-less ReadOnly filtered out.
	assert_eq!(names, vec!["Enabled", "Label", "Threshold"]);

	let names_again: Vec<&str> = second.iter().map(|d| d.name).collect();
	assert_eq!(names, names_again);
	assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn test_restore_applies_persisted_values_before_setup() {
	let mut store = PrefStore::in_memory();
	store.set(
		property_key(SPEC.id, "Threshold"),
		42i64,
		OverridePolicy::AlwaysOverwrite,
	);
	store.set(
		property_key(SPEC.id, "Enabled"),
		true,
		OverridePolicy::AlwaysOverwrite,
	);
	// Wrong kind: must be skipped with the in-code default kept.
	store.set(
		property_key(SPEC.id, "Label"),
		99i64,
		OverridePolicy::AlwaysOverwrite,
	);

	let mut registry = Registry::load(store);
	registry.install(Ok(Box::new(Counter::default())));

	let counter = counter_at(&registry, 0);
	assert_eq!(counter.threshold, 42);
	assert_eq!(counter.label, "");
	assert!(counter.core.enabled());
	assert!(counter.core.is_restored());
	assert_eq!(counter.setup_calls, 1);
	// Restoring Enabled=true goes through the transition hook.
	assert_eq!(counter.enabled_transitions, 1);
}

#[test]
fn test_disabled_generator_is_not_set_up() {
	let mut registry = Registry::load(PrefStore::in_memory());
	registry.install(Ok(Box::new(Counter::default())));

	let counter = counter_at(&registry, 0);
	assert!(!counter.core.enabled());
	assert_eq!(counter.setup_calls, 0);
}

#[test]
fn test_failed_construction_and_setup_are_excluded() {
	let mut store = PrefStore::in_memory();
	store.set(
		property_key(SPEC.id, "Enabled"),
		true,
		OverridePolicy::AlwaysOverwrite,
	);

	let mut registry = Registry::load(store);
	registry.install(Err(GeneratorError::new("fixture constructor failure")));
	registry.install(Ok(Box::new(Counter {
		fail_setup: true,
		..Counter::default()
	})));
	assert_eq!(registry.factory_count(), 0);

	// Discovery continues past failures.
	registry.install(Ok(Box::new(Counter::default())));
	assert_eq!(registry.factory_count(), 1);
}

#[test]
fn test_factory_access_is_bounds_checked() {
	let mut registry = Registry::load(PrefStore::in_memory());
	registry.install(Ok(Box::new(Counter::default())));

	assert!(registry.factory(0).is_some());
	assert!(registry.factory(1).is_none());
	assert!(registry.factory(usize::MAX).is_none());
}

#[test]
fn test_persist_all_round_trips_through_a_fresh_registry() {
	let mut registry = Registry::load(PrefStore::in_memory());
	registry.install(Ok(Box::new(Counter {
		threshold: 7,
		label: "alpha".to_string(),
		..Counter::default()
	})));
	registry.persist_all().unwrap();

	let store = registry.store;
	let mut reloaded = Registry::load(store);
	reloaded.install(Ok(Box::new(Counter::default())));

	let counter = counter_at(&reloaded, 0);
	assert_eq!(counter.threshold, 7);
	assert_eq!(counter.label, "alpha");
}

#[test]
fn test_session_dirty_gating_blocks_reselection() {
	let mut registry = Registry::load(PrefStore::in_memory());
	registry.install(Ok(Box::new(Counter::default())));
	registry.install(Ok(Box::new(Counter::default())));

	let mut session = EditSession::new();
	session.select(&registry, 0).unwrap();

	// Slot order is [Enabled, Label, Threshold].
	session.set_value(2, PrefValue::Int(5)).unwrap();
	assert!(session.is_dirty());

	assert!(matches!(
		session.select(&registry, 1),
		Err(SessionError::DirtyPending)
	));

	// Reselecting the current index stays a no-op.
	session.select(&registry, 0).unwrap();
	assert!(session.is_dirty());

	session.select_discarding(&registry, 1).unwrap();
	assert_eq!(session.selected(), Some(1));
	assert!(!session.is_dirty());
	assert_eq!(counter_at(&registry, 0).threshold, 0);
}

#[test]
fn test_apply_writes_through_and_fires_hook_once() {
	let mut registry = Registry::load(PrefStore::in_memory());
	registry.install(Ok(Box::new(Counter::default())));

	let mut session = EditSession::new();
	session.select(&registry, 0).unwrap();
	session.set_value(1, PrefValue::String("beta".to_string())).unwrap();
	session.set_value(2, PrefValue::Int(9)).unwrap();

	let errors = session.apply(&mut registry).unwrap();
	assert!(errors.is_empty());
	assert!(!session.is_dirty());

	let counter = counter_at(&registry, 0);
	assert_eq!(counter.label, "beta");
	assert_eq!(counter.threshold, 9);
	assert_eq!(counter.apply_calls, 1);

	assert_eq!(
		registry.store().get(&property_key(SPEC.id, "Threshold")),
		Some(&PrefValue::Int(9))
	);
}

#[test]
fn test_apply_commits_best_effort_past_kind_mismatches() {
	let mut registry = Registry::load(PrefStore::in_memory());
	registry.install(Ok(Box::new(Counter::default())));

	let mut session = EditSession::new();
	session.select(&registry, 0).unwrap();
	// Wrong kind for Label; Threshold is still valid.
	session.set_value(1, PrefValue::Int(123)).unwrap();
	session.set_value(2, PrefValue::Int(9)).unwrap();

	let errors = session.apply(&mut registry).unwrap();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].property, "Label");
	assert_eq!(errors[0].generator, SPEC.id);

	let counter = counter_at(&registry, 0);
	assert_eq!(counter.label, "");
	assert_eq!(counter.threshold, 9);
	// The hook still runs exactly once after the batch.
	assert_eq!(counter.apply_calls, 1);
	assert!(!session.is_dirty());
}

#[test]
fn test_revert_reloads_live_values() {
	let mut registry = Registry::load(PrefStore::in_memory());
	registry.install(Ok(Box::new(Counter {
		threshold: 3,
		..Counter::default()
	})));

	let mut session = EditSession::new();
	session.select(&registry, 0).unwrap();
	session.set_value(2, PrefValue::Int(100)).unwrap();
	assert!(session.is_dirty());

	session.revert(&registry).unwrap();
	assert!(!session.is_dirty());
	assert_eq!(session.value(2), Some(&PrefValue::Int(3)));
	assert_eq!(counter_at(&registry, 0).threshold, 3);
}
