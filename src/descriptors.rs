//! Configuration descriptors for introspection and diagnostics.

use crate::lifetime::Lifetime;

/// Snapshot of one configuration held by a [`Registry`](crate::Registry).
///
/// Descriptors are produced by [`Registry::descriptors`](crate::Registry::descriptors)
/// and are detached from the registry: they do not change when the registry
/// does. With the `serde` feature they can be serialized, e.g. for a
/// diagnostics endpoint or a startup dump.
///
/// # Examples
///
/// ```rust
/// use lucid_ioc::{implements, Lifetime, Registry};
///
/// trait Clock: Send + Sync {}
///
/// #[derive(Default)]
/// struct SystemClock;
/// impl Clock for SystemClock {}
///
/// implements!(dyn Clock => SystemClock);
///
/// let mut registry = Registry::new();
/// registry.configure::<dyn Clock, SystemClock>().as_singleton().named("system");
/// registry.configure::<u32, u32>();
///
/// let descriptors = registry.descriptors();
/// assert_eq!(descriptors.len(), 2);
///
/// let clock = descriptors.iter()
///     .find(|d| d.abstraction.contains("Clock"))
///     .unwrap();
/// assert_eq!(clock.lifetime, Lifetime::Singleton);
/// assert_eq!(clock.service_name(), Some("system"));
/// assert!(clock.implementation.unwrap().contains("SystemClock"));
/// assert!(!clock.has_instance);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConfigurationDescriptor {
    /// Type name of the abstraction
    pub abstraction: &'static str,
    /// Name of the configuration, `None` for the unnamed default
    pub name: Option<String>,
    /// Configured lifetime
    pub lifetime: Lifetime,
    /// Type name of the implementation, if known
    pub implementation: Option<&'static str>,
    /// Whether a singleton instance is currently cached
    pub has_instance: bool,
    /// Position within the abstraction's collection
    pub position: usize,
}

impl ConfigurationDescriptor {
    /// The configuration name, or `None` for the unnamed default.
    pub fn service_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if this is a named configuration
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}
