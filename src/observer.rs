//! Diagnostic observers for registry events.
//!
//! The registry itself never logs. Attach an observer to trace what is being
//! configured, resolved and disposed; [`LoggingObserver`] forwards every event
//! to the `tracing` ecosystem.

use std::sync::Arc;
use std::time::Duration;

use crate::error::IocError;
use crate::key::AbstractionKey;
use crate::lifetime::Lifetime;

/// Observer trait for registry events.
///
/// Observers are called synchronously from the registry operation that
/// triggered the event, so implementations should stay cheap.
///
/// # Examples
///
/// ```
/// use lucid_ioc::{AbstractionKey, Registry, RegistryObserver};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder {
///     resolved: Mutex<Vec<String>>,
/// }
///
/// impl RegistryObserver for Recorder {
///     fn resolving(&self, _key: &AbstractionKey, _name: Option<&str>) {}
///
///     fn resolved(&self, key: &AbstractionKey, _name: Option<&str>, _elapsed: Duration, _cached: bool) {
///         self.resolved.lock().unwrap().push(key.type_name().to_string());
///     }
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let mut registry = Registry::builder().observer(recorder.clone()).build();
/// registry.configure::<u8, u8>();
/// registry.get_instance::<u8>().unwrap();
///
/// assert_eq!(*recorder.resolved.lock().unwrap(), vec!["u8".to_string()]);
/// ```
pub trait RegistryObserver: Send + Sync {
    /// Called before an abstraction is looked up.
    fn resolving(&self, key: &AbstractionKey, name: Option<&str>);

    /// Called after an instance has been produced.
    ///
    /// `cached` is `true` when a cached singleton was returned without
    /// running the constructor.
    fn resolved(&self, key: &AbstractionKey, name: Option<&str>, elapsed: Duration, cached: bool);

    /// Called when a lookup fails.
    fn resolution_failed(&self, _key: &AbstractionKey, _name: Option<&str>, _error: &IocError) {}

    /// Called when a configuration is stored.
    ///
    /// `replaced` is `true` when it took the place of a configuration with
    /// the same name.
    fn configured(&self, _key: &AbstractionKey, _name: Option<&str>, _lifetime: Lifetime, _replaced: bool) {}

    /// Called after cached instances of an abstraction were evicted by a reset.
    fn disposed(&self, _key: &AbstractionKey, _disposed: usize) {}

    /// Called once a reset has cleared the registry.
    fn reset(&self, _abstractions: usize) {}
}

/// Collection of registered observers.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn RegistryObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn RegistryObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub(crate) fn resolving(&self, key: &AbstractionKey, name: Option<&str>) {
        for observer in &self.observers {
            observer.resolving(key, name);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, key: &AbstractionKey, name: Option<&str>, elapsed: Duration, cached: bool) {
        for observer in &self.observers {
            observer.resolved(key, name, elapsed, cached);
        }
    }

    #[inline]
    pub(crate) fn resolution_failed(&self, key: &AbstractionKey, name: Option<&str>, error: &IocError) {
        for observer in &self.observers {
            observer.resolution_failed(key, name, error);
        }
    }

    #[inline]
    pub(crate) fn configured(&self, key: &AbstractionKey, name: Option<&str>, lifetime: Lifetime, replaced: bool) {
        for observer in &self.observers {
            observer.configured(key, name, lifetime, replaced);
        }
    }

    #[inline]
    pub(crate) fn disposed(&self, key: &AbstractionKey, disposed: usize) {
        for observer in &self.observers {
            observer.disposed(key, disposed);
        }
    }

    #[inline]
    pub(crate) fn reset(&self, abstractions: usize) {
        for observer in &self.observers {
            observer.reset(abstractions);
        }
    }
}

/// Built-in observer that emits `tracing` events.
///
/// Configuration, disposal, reset and failures are logged at `DEBUG`,
/// resolutions at `TRACE`. Every event carries the abstraction's type name
/// and, where relevant, the configuration name as structured fields.
///
/// # Examples
///
/// ```
/// use lucid_ioc::{LoggingObserver, Registry};
/// use std::sync::Arc;
///
/// let mut registry = Registry::builder()
///     .observer(Arc::new(LoggingObserver::with_target("app::ioc")))
///     .build();
///
/// // Events go to whatever tracing subscriber is installed
/// registry.configure::<String, String>().as_singleton();
/// let _ = registry.get_instance::<String>();
/// ```
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    target: String,
}

impl LoggingObserver {
    /// Creates a logging observer with the default `lucid_ioc` label.
    pub fn new() -> Self {
        Self {
            target: "lucid_ioc".to_string(),
        }
    }

    /// Creates a logging observer whose events carry a custom `target` field.
    pub fn with_target(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryObserver for LoggingObserver {
    fn resolving(&self, key: &AbstractionKey, name: Option<&str>) {
        tracing::trace!(
            registry = %self.target,
            abstraction = key.type_name(),
            name = name.unwrap_or_default(),
            "resolving"
        );
    }

    fn resolved(&self, key: &AbstractionKey, name: Option<&str>, elapsed: Duration, cached: bool) {
        tracing::trace!(
            registry = %self.target,
            abstraction = key.type_name(),
            name = name.unwrap_or_default(),
            ?elapsed,
            cached,
            "resolved"
        );
    }

    fn resolution_failed(&self, key: &AbstractionKey, name: Option<&str>, error: &IocError) {
        tracing::debug!(
            registry = %self.target,
            abstraction = key.type_name(),
            name = name.unwrap_or_default(),
            %error,
            "resolution failed"
        );
    }

    fn configured(&self, key: &AbstractionKey, name: Option<&str>, lifetime: Lifetime, replaced: bool) {
        tracing::debug!(
            registry = %self.target,
            abstraction = key.type_name(),
            name = name.unwrap_or_default(),
            ?lifetime,
            replaced,
            "configured"
        );
    }

    fn disposed(&self, key: &AbstractionKey, disposed: usize) {
        tracing::debug!(
            registry = %self.target,
            abstraction = key.type_name(),
            disposed,
            "disposed cached instances"
        );
    }

    fn reset(&self, abstractions: usize) {
        tracing::debug!(registry = %self.target, abstractions, "registry reset");
    }
}
