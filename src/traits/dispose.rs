//! Disposal trait for resource cleanup.

/// Trait for synchronous resource disposal.
///
/// Implement this trait for implementations that need structured teardown
/// (flushing buffers, closing handles). Register them with
/// [`Registry::configure_disposable`](crate::Registry::configure_disposable):
/// the cleanup hook is captured when the instance is constructed and runs
/// when a cached singleton is evicted, either because its configuration is
/// replaced or because the registry is reset.
///
/// Transient instances are never disposed by the registry.
///
/// # Examples
///
/// ```
/// use lucid_ioc::{Dispose, Registry};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Cache {
///     flushed: AtomicBool,
/// }
///
/// impl Dispose for Cache {
///     fn dispose(&self) {
///         self.flushed.store(true, Ordering::SeqCst);
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.configure_disposable::<Cache, Cache>().as_singleton();
///
/// let cache = registry.get_instance::<Cache>().unwrap();
/// registry.reset();
/// assert!(cache.flushed.load(Ordering::SeqCst));
/// ```
pub trait Dispose: Send + Sync + 'static {
    /// Perform synchronous cleanup of resources.
    fn dispose(&self);
}
