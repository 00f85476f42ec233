//! Fluent configuration of a freshly created entry.

use std::fmt;

use super::Registry;
use crate::key::AbstractionKey;
use crate::lifetime::Lifetime;
use crate::registration::ResolutionInfo;

/// Builder returned by the `configure*` methods of [`Registry`].
///
/// Wraps the configuration that was just created so it can be marked as a
/// singleton or given a name. The configuration is stored in the registry
/// when the context is dropped, which for the usual chained call is the end
/// of the statement. Naming therefore takes effect before the
/// replace-by-name rule is applied: configuring a named entry never evicts
/// the unnamed default.
///
/// While a context is alive it holds the registry mutably, so nothing can
/// resolve the abstraction before its configuration is complete.
///
/// # Examples
///
/// ```
/// use lucid_ioc::{implements, Registry};
/// use std::sync::Arc;
///
/// trait Store: Send + Sync {}
/// #[derive(Default)]
/// struct Memory;
/// #[derive(Default)]
/// struct Disk;
/// impl Store for Memory {}
/// impl Store for Disk {}
/// implements!(dyn Store => Memory, Disk);
///
/// let mut registry = Registry::new();
/// registry.configure::<dyn Store, Memory>().as_singleton();
/// registry.configure::<dyn Store, Disk>().named("disk").as_singleton();
///
/// let a = registry.get_instance::<dyn Store>().unwrap();
/// let b = registry.get_instance::<dyn Store>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert!(registry.get_named_instance::<dyn Store>("disk").is_ok());
/// ```
pub struct ResolutionContext<'r, A>
where
    A: ?Sized + Send + Sync + 'static,
{
    registry: &'r mut Registry,
    key: AbstractionKey,
    entry: Option<ResolutionInfo<A>>,
}

impl<'r, A> ResolutionContext<'r, A>
where
    A: ?Sized + Send + Sync + 'static,
{
    pub(crate) fn new(registry: &'r mut Registry, entry: ResolutionInfo<A>) -> Self {
        Self {
            registry,
            key: AbstractionKey::of::<A>(),
            entry: Some(entry),
        }
    }

    /// Caches the first resolved instance and returns it on every later
    /// resolution.
    pub fn as_singleton(self) -> Self {
        self.with_lifetime(Lifetime::Singleton)
    }

    /// Names the configuration. A second call overwrites the first.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        if let Some(entry) = self.entry.as_mut() {
            entry.set_name(name.into());
        }
        self
    }

    /// Sets the lifetime explicitly.
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        if let Some(entry) = self.entry.as_mut() {
            entry.set_lifetime(lifetime);
        }
        self
    }

    /// Name the configuration will be stored under.
    pub fn name(&self) -> Option<&str> {
        self.entry.as_ref().and_then(ResolutionInfo::name)
    }

    pub fn lifetime(&self) -> Lifetime {
        self.entry
            .as_ref()
            .map(ResolutionInfo::lifetime)
            .unwrap_or_default()
    }
}

impl<A> Drop for ResolutionContext<'_, A>
where
    A: ?Sized + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if let Some(entry) = self.entry.take() {
            self.registry.store(self.key, entry);
        }
    }
}

impl<A> fmt::Debug for ResolutionContext<'_, A>
where
    A: ?Sized + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("abstraction", &self.key)
            .field("entry", &self.entry)
            .finish()
    }
}
