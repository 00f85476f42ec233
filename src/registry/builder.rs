//! Registry construction options.

use std::sync::Arc;

use super::table::{CollectionTable, DEFAULT_INLINE_CAPACITY};
use super::Registry;
use crate::observer::{Observers, RegistryObserver};

/// Builder for a [`Registry`] with observers or non-default storage.
///
/// # Examples
///
/// ```
/// use lucid_ioc::{LoggingObserver, Registry};
/// use std::sync::Arc;
///
/// let registry = Registry::builder()
///     .observer(Arc::new(LoggingObserver::new()))
///     .inline_capacity(4)
///     .build();
///
/// assert!(registry.is_empty());
/// ```
#[derive(Clone)]
pub struct RegistryBuilder {
    observers: Observers,
    inline_capacity: usize,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            observers: Observers::new(),
            inline_capacity: DEFAULT_INLINE_CAPACITY,
        }
    }

    /// Attaches an observer. Observers are notified in the order they were added.
    pub fn observer(mut self, observer: Arc<dyn RegistryObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    /// Number of abstractions kept in the linear-scan vector before further
    /// ones spill into a hash map. Defaults to 16.
    pub fn inline_capacity(mut self, capacity: usize) -> Self {
        self.inline_capacity = capacity;
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            collections: CollectionTable::new(self.inline_capacity),
            observers: self.observers,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
