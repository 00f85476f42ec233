use lucid_ioc::{implements, IocError, Lifetime, Registry};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

trait Comparable: Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl Comparable for i32 {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default, PartialEq)]
struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Comparable for Decimal {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

implements!(dyn Comparable => i32, Decimal);

#[test]
fn test_unconfigured_abstraction() {
    let mut registry = Registry::new();

    assert!(!registry.is_configured::<dyn Comparable>());
    match registry.get_instance::<dyn Comparable>() {
        Err(IocError::NotConfigured(name)) => assert!(name.contains("Comparable")),
        other => panic!("expected NotConfigured, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_transient_returns_distinct_instances() {
    let mut registry = Registry::new();
    registry.configure::<dyn Comparable, i32>();

    assert!(registry.is_configured::<dyn Comparable>());

    let first = registry.get_instance::<dyn Comparable>().unwrap();
    let second = registry.get_instance::<dyn Comparable>().unwrap();

    assert_eq!(first.as_any().downcast_ref::<i32>(), Some(&0));
    assert_eq!(second.as_any().downcast_ref::<i32>(), Some(&0));
    assert!(!Arc::ptr_eq(&first, &second)); // Different instances
}

#[test]
fn test_singleton_returns_cached_instance() {
    let mut registry = Registry::new();
    registry.configure::<dyn Comparable, i32>().as_singleton();

    let first = registry.get_instance::<dyn Comparable>().unwrap();
    let second = registry.get_instance::<dyn Comparable>().unwrap();

    assert!(Arc::ptr_eq(&first, &second)); // Same instance
}

#[test]
fn test_named_configurations_resolve_independently() {
    let mut registry = Registry::new();
    registry.configure::<dyn Comparable, i32>().named("Int");
    registry.configure::<dyn Comparable, Decimal>().named("Decimal");

    let int = registry.get_named_instance::<dyn Comparable>("Int").unwrap();
    let decimal = registry.get_named_instance::<dyn Comparable>("Decimal").unwrap();

    assert!(int.as_any().is::<i32>());
    assert_eq!(
        decimal.as_any().downcast_ref::<Decimal>(),
        Some(&Decimal::default())
    );
    assert_eq!(registry.collection::<dyn Comparable>().unwrap().len(), 2);
}

#[test]
fn test_reconfigure_replaces_unnamed_default() {
    let mut registry = Registry::new();
    registry.configure::<dyn Comparable, i32>();
    registry.configure::<dyn Comparable, Decimal>();

    let instance = registry.get_instance::<dyn Comparable>().unwrap();
    assert!(instance.as_any().is::<Decimal>());
    assert_eq!(registry.collection::<dyn Comparable>().unwrap().len(), 1);
}

#[test]
fn test_named_configuration_keeps_unnamed_default() {
    let mut registry = Registry::new();
    registry.configure::<dyn Comparable, i32>();
    registry.configure::<dyn Comparable, Decimal>().named("Decimal");

    // The unnamed entry is still the default
    let default = registry.get_instance::<dyn Comparable>().unwrap();
    assert!(default.as_any().is::<i32>());

    let named = registry.get_named_instance::<dyn Comparable>("Decimal").unwrap();
    assert!(named.as_any().is::<Decimal>());
}

#[test]
fn test_single_named_configuration_is_default() {
    let mut registry = Registry::new();
    registry.configure::<dyn Comparable, Decimal>().named("Decimal");

    let instance = registry.get_instance::<dyn Comparable>().unwrap();
    assert!(instance.as_any().is::<Decimal>());
}

#[test]
fn test_only_named_configurations_are_ambiguous() {
    let mut registry = Registry::new();
    registry.configure::<dyn Comparable, i32>().named("Int");
    registry.configure::<dyn Comparable, Decimal>().named("Decimal");

    match registry.get_instance::<dyn Comparable>() {
        Err(IocError::Ambiguous { name, matches, .. }) => {
            assert_eq!(name, None);
            assert_eq!(matches, 2);
        }
        other => panic!("expected Ambiguous, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_unknown_name_is_not_found() {
    let mut registry = Registry::new();
    registry.configure::<dyn Comparable, i32>();

    match registry.get_named_instance::<dyn Comparable>("Missing") {
        Err(IocError::NotFound { name, .. }) => assert_eq!(name, "Missing"),
        other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_concrete_abstraction() {
    let mut registry = Registry::new();
    registry.configure::<String, String>().as_singleton();
    registry.configure::<u64, u64>();

    assert_eq!(*registry.get_instance::<String>().unwrap(), "");
    assert_eq!(*registry.get_instance::<u64>().unwrap(), 0);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_factory_runs_per_resolution_for_transient() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mut registry = Registry::new();
    registry.configure_with::<dyn Comparable, _>(move || {
        Arc::new(counter.fetch_add(1, Ordering::SeqCst) as i32)
    });

    for expected in 0..3 {
        let value = registry.get_instance::<dyn Comparable>().unwrap();
        assert_eq!(value.as_any().downcast_ref::<i32>(), Some(&expected));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_factory_runs_once_for_singleton() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let mut registry = Registry::new();
    registry
        .configure_with::<String, _>(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new("expensive".to_string())
        })
        .as_singleton();

    for _ in 0..5 {
        assert_eq!(registry.get_instance::<String>().unwrap().as_str(), "expensive");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_with_lifetime_matches_as_singleton() {
    let mut registry = Registry::new();
    registry
        .configure::<dyn Comparable, i32>()
        .with_lifetime(Lifetime::Singleton);

    let first = registry.get_instance::<dyn Comparable>().unwrap();
    let second = registry.get_instance::<dyn Comparable>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_reset_clears_configuration() {
    let mut registry = Registry::new();
    registry.configure::<dyn Comparable, i32>().as_singleton();
    registry.configure::<String, String>().named("name");

    registry.reset();

    assert!(!registry.is_configured::<dyn Comparable>());
    assert!(!registry.is_configured::<String>());
    assert!(registry.is_empty());
    assert!(matches!(
        registry.get_instance::<dyn Comparable>(),
        Err(IocError::NotConfigured(_))
    ));
}

#[test]
fn test_registries_are_independent() {
    let mut first = Registry::new();
    let second = Registry::new();

    first.configure::<dyn Comparable, i32>();

    assert!(first.is_configured::<dyn Comparable>());
    assert!(!second.is_configured::<dyn Comparable>());
}

#[test]
#[should_panic(expected = "factory failed")]
fn test_factory_panic_propagates() {
    let mut registry = Registry::new();
    registry.configure_with::<String, _>(|| panic!("factory failed"));

    let _ = registry.get_instance::<String>();
}
