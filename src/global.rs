//! The process-wide registry instance and access functions.

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};

use crate::registry::Registry;

// Created on first access.
static GLOBAL_REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::new()));

/// Locks the process-wide registry.
///
/// For code that wants a single registry reachable from anywhere. The guard
/// serializes every operation, including the constructors run while
/// resolving, so a factory must not call `global()` itself.
///
/// Independent [`Registry`] values are usually a better fit for tests, since
/// they do not leak configurations from one test into another.
///
/// # Examples
///
/// ```
/// use lucid_ioc::global;
///
/// global().configure_with::<String, _>(|| "Hello from global!".to_string().into()).named("greeting");
///
/// let greeting = global().get_named_instance::<String>("greeting").unwrap();
/// assert_eq!(greeting.as_str(), "Hello from global!");
/// ```
pub fn global() -> MutexGuard<'static, Registry> {
    GLOBAL_REGISTRY.lock()
}
