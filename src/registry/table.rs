//! Storage of collections keyed by abstraction.

use std::collections::HashMap;

use crate::collection::ErasedCollection;
use crate::key::AbstractionKey;

pub(crate) type BoxedCollection = Box<dyn ErasedCollection>;

#[cfg(feature = "ahash")]
type LargeMap = HashMap<AbstractionKey, BoxedCollection, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
type LargeMap = HashMap<AbstractionKey, BoxedCollection>;

/// Default number of abstractions kept in the linear-scan vector.
pub(crate) const DEFAULT_INLINE_CAPACITY: usize = 16;

/// Hybrid table: the first `inline_capacity` abstractions live in a vector
/// scanned linearly, the rest in a hash map.
pub(crate) struct CollectionTable {
    small: Vec<(AbstractionKey, BoxedCollection)>,
    large: LargeMap,
    inline_capacity: usize,
}

impl CollectionTable {
    pub(crate) fn new(inline_capacity: usize) -> Self {
        Self {
            small: Vec::new(),
            large: LargeMap::default(),
            inline_capacity,
        }
    }

    pub(crate) fn get(&self, key: &AbstractionKey) -> Option<&BoxedCollection> {
        self.small
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c)
            .or_else(|| self.large.get(key))
    }

    pub(crate) fn get_mut(&mut self, key: &AbstractionKey) -> Option<&mut BoxedCollection> {
        if let Some(pos) = self.small.iter().position(|(k, _)| k == key) {
            return Some(&mut self.small[pos].1);
        }
        self.large.get_mut(key)
    }

    pub(crate) fn contains_key(&self, key: &AbstractionKey) -> bool {
        self.small.iter().any(|(k, _)| k == key) || self.large.contains_key(key)
    }

    /// Returns the collection for `key`, inserting `make()` when absent.
    pub(crate) fn get_or_insert_with<F>(&mut self, key: AbstractionKey, make: F) -> &mut BoxedCollection
    where
        F: FnOnce() -> BoxedCollection,
    {
        if let Some(pos) = self.small.iter().position(|(k, _)| k == &key) {
            return &mut self.small[pos].1;
        }
        if self.small.len() < self.inline_capacity && !self.large.contains_key(&key) {
            self.small.push((key, make()));
            let last = self.small.len() - 1;
            return &mut self.small[last].1;
        }
        self.large.entry(key).or_insert_with(make)
    }

    /// Iterates in storage order: inline entries first, then the map.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&AbstractionKey, &BoxedCollection)> {
        self.small
            .iter()
            .map(|(k, c)| (k, c))
            .chain(self.large.iter())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&AbstractionKey, &mut BoxedCollection)> {
        self.small
            .iter_mut()
            .map(|(k, c)| (&*k, c))
            .chain(self.large.iter_mut())
    }

    pub(crate) fn len(&self) -> usize {
        self.small.len() + self.large.len()
    }

    pub(crate) fn clear(&mut self) {
        self.small.clear();
        self.large.clear();
    }
}
