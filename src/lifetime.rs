//! Instance lifetime definitions.

/// Lifetimes controlling whether a configuration caches its instance
///
/// Every configuration starts out [`Transient`](Lifetime::Transient);
/// [`ResolutionContext::as_singleton`](crate::ResolutionContext::as_singleton)
/// switches it to [`Singleton`](Lifetime::Singleton) before the first
/// resolution.
///
/// # Examples
///
/// ```rust
/// use lucid_ioc::{Lifetime, Registry};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Database;
/// #[derive(Default)]
/// struct RequestModel;
///
/// let mut registry = Registry::new();
/// registry.configure::<Database, Database>().as_singleton();
/// registry.configure::<RequestModel, RequestModel>();
///
/// // Singleton: same instance every time
/// let db1 = registry.get_instance::<Database>().unwrap();
/// let db2 = registry.get_instance::<Database>().unwrap();
/// assert!(Arc::ptr_eq(&db1, &db2));
///
/// // Transient: a fresh instance every time
/// let m1 = registry.get_instance::<RequestModel>().unwrap();
/// let m2 = registry.get_instance::<RequestModel>().unwrap();
/// assert!(!Arc::ptr_eq(&m1, &m2));
///
/// assert_eq!(Lifetime::default(), Lifetime::Transient);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Lifetime {
    /// New instance per resolution, never cached
    #[default]
    Transient,
    /// Instance created on first resolution and cached on the configuration
    ///
    /// The cached instance is returned until the configuration is replaced
    /// or the registry is reset, at which point its cleanup hook (if any)
    /// runs.
    Singleton,
}

impl Lifetime {
    /// Returns `true` for [`Lifetime::Singleton`].
    pub fn is_singleton(self) -> bool {
        matches!(self, Lifetime::Singleton)
    }
}
