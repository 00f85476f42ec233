//! Per-abstraction configuration collections.
//!
//! A [`ConfigurationCollection`] holds every configuration of one
//! abstraction, in insertion order, keyed by optional name.

use std::fmt;

use crate::error::{IocError, IocResult};
use crate::registration::ResolutionInfo;

mod erased;

pub(crate) use erased::ErasedCollection;

#[cfg(feature = "smallvec")]
type Entries<A> = smallvec::SmallVec<[ResolutionInfo<A>; 4]>;
#[cfg(not(feature = "smallvec"))]
type Entries<A> = Vec<ResolutionInfo<A>>;

/// Ordered configurations of a single abstraction.
///
/// No two entries share a name; the unnamed default counts as a name of its
/// own. Storing an entry with a name that is already present replaces the
/// existing entry in place and disposes its cached instance.
///
/// # Resolution rules
///
/// - [`get`](Self::get) returns the unique unnamed entry. If there is no
///   unique unnamed entry but the collection holds exactly one entry, that
///   entry is returned whatever its name. Anything else is ambiguous.
/// - [`get_named`](Self::get_named) returns the unique entry with the name.
///
/// # Examples
///
/// ```
/// use lucid_ioc::{ConfigurationCollection, ResolutionInfo};
/// use std::sync::Arc;
///
/// let mut collection = ConfigurationCollection::<u32>::new();
/// collection.store(ResolutionInfo::from_fn(|| Arc::new(1)).with_name("one"));
///
/// // A sole named entry still answers unnamed lookups
/// assert_eq!(collection.get().unwrap().name(), Some("one"));
///
/// collection.store(ResolutionInfo::from_fn(|| Arc::new(2)).with_name("two"));
/// assert!(collection.get().is_err());
/// assert!(collection.get_named("two").is_ok());
/// ```
pub struct ConfigurationCollection<A: ?Sized> {
    entries: Entries<A>,
}

impl<A: ?Sized + 'static> ConfigurationCollection<A> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self {
            entries: Entries::<A>::new(),
        }
    }

    /// Stores a configuration, replacing the entry with the same name.
    ///
    /// The replaced entry keeps its position; its cached instance is disposed
    /// before it is dropped. Returns `true` when an entry was replaced.
    pub fn store(&mut self, entry: ResolutionInfo<A>) -> bool {
        match self.entries.iter().position(|e| e.name() == entry.name()) {
            Some(index) => {
                let mut replaced = std::mem::replace(&mut self.entries[index], entry);
                replaced.dispose_instance();
                true
            }
            None => {
                self.entries.push(entry);
                false
            }
        }
    }

    /// The default configuration.
    ///
    /// # Errors
    ///
    /// [`IocError::Ambiguous`] when there is neither a unique unnamed entry
    /// nor exactly one entry overall, [`IocError::NotConfigured`] when the
    /// collection is empty.
    pub fn get(&self) -> IocResult<&ResolutionInfo<A>> {
        self.default_index().map(|index| &self.entries[index])
    }

    /// Mutable access to the default configuration; same rules as [`get`](Self::get).
    pub fn get_mut(&mut self) -> IocResult<&mut ResolutionInfo<A>> {
        let index = self.default_index()?;
        Ok(&mut self.entries[index])
    }

    /// The configuration with the given name.
    ///
    /// # Errors
    ///
    /// [`IocError::NotFound`] when no entry carries the name,
    /// [`IocError::Ambiguous`] when more than one does.
    pub fn get_named(&self, name: &str) -> IocResult<&ResolutionInfo<A>> {
        self.named_index(name).map(|index| &self.entries[index])
    }

    /// Mutable access to a named configuration; same rules as [`get_named`](Self::get_named).
    pub fn get_named_mut(&mut self, name: &str) -> IocResult<&mut ResolutionInfo<A>> {
        let index = self.named_index(name)?;
        Ok(&mut self.entries[index])
    }

    /// Whether any configuration has been stored.
    pub fn has_configuration(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the configurations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolutionInfo<A>> {
        self.entries.iter()
    }

    /// Names of the configurations in insertion order.
    pub fn names(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(ResolutionInfo::name)
    }

    /// Evicts every cached instance, running cleanup hooks where present.
    ///
    /// Returns the number of hooks that ran.
    pub fn dispose_disposable_instances(&mut self) -> usize {
        self.entries
            .iter_mut()
            .map(ResolutionInfo::dispose_instance)
            .filter(|disposed| *disposed)
            .count()
    }

    fn default_index(&self) -> IocResult<usize> {
        let mut unnamed = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name().is_none())
            .map(|(index, _)| index);

        match (unnamed.next(), unnamed.next()) {
            (Some(index), None) => Ok(index),
            _ if self.entries.len() == 1 => Ok(0),
            _ if self.entries.is_empty() => {
                Err(IocError::NotConfigured(std::any::type_name::<A>()))
            }
            _ => Err(IocError::Ambiguous {
                abstraction: std::any::type_name::<A>(),
                name: None,
                matches: self.entries.len(),
            }),
        }
    }

    fn named_index(&self, name: &str) -> IocResult<usize> {
        let mut matches = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name() == Some(name))
            .map(|(index, _)| index);

        match (matches.next(), matches.next()) {
            (Some(index), None) => Ok(index),
            (None, _) => Err(IocError::NotFound {
                abstraction: std::any::type_name::<A>(),
                name: name.to_string(),
            }),
            (Some(_), Some(_)) => Err(IocError::Ambiguous {
                abstraction: std::any::type_name::<A>(),
                name: Some(name.to_string()),
                matches: 2 + matches.count(),
            }),
        }
    }
}

impl<A: ?Sized + 'static> Default for ConfigurationCollection<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for ConfigurationCollection<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifetime::Lifetime;
    use crate::registration::Instance;
    use crate::traits::Dispose;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct DisposeTester {
        disposed: AtomicBool,
    }

    impl Dispose for DisposeTester {
        fn dispose(&self) {
            self.disposed.store(true, Ordering::SeqCst);
        }
    }

    fn unnamed(value: u32) -> ResolutionInfo<u32> {
        ResolutionInfo::from_fn(move || Arc::new(value))
    }

    #[test]
    fn test_empty_collection_has_no_configuration() {
        let collection = ConfigurationCollection::<u32>::new();
        assert!(!collection.has_configuration());
        assert_eq!(collection.get().unwrap_err(), IocError::NotConfigured("u32"));
    }

    #[test]
    fn test_store_unnamed_configuration() {
        let mut collection = ConfigurationCollection::new();
        assert!(!collection.store(unnamed(1)));
        assert!(collection.has_configuration());
        assert_eq!(*collection.get_mut().unwrap().resolve(), 1);
    }

    #[test]
    fn test_store_replaces_existing_unnamed_configuration() {
        let mut collection = ConfigurationCollection::new();
        collection.store(unnamed(1).with_lifetime(Lifetime::Singleton));
        assert!(collection.store(unnamed(2)));

        assert_eq!(collection.len(), 1);
        let entry = collection.get_mut().unwrap();
        assert!(!entry.is_singleton());
        assert_eq!(*entry.resolve(), 2);
    }

    #[test]
    fn test_store_replaces_in_place() {
        let mut collection = ConfigurationCollection::new();
        collection.store(unnamed(1).with_name("a"));
        collection.store(unnamed(2).with_name("b"));
        collection.store(unnamed(3).with_name("c"));
        collection.store(unnamed(4).with_name("b"));

        let names: Vec<_> = collection.names().collect();
        assert_eq!(names, vec![Some("a"), Some("b"), Some("c")]);
        assert_eq!(*collection.get_named_mut("b").unwrap().resolve(), 4);
    }

    #[test]
    fn test_store_disposes_replaced_instance() {
        let tester = Arc::new(DisposeTester { disposed: AtomicBool::new(false) });
        let cached = tester.clone();

        let mut collection = ConfigurationCollection::<DisposeTester>::new();
        collection.store(
            ResolutionInfo::new(move || Instance::disposable(cached.clone()))
                .with_lifetime(Lifetime::Singleton),
        );
        collection.get_mut().unwrap().resolve();
        assert!(!tester.disposed.load(Ordering::SeqCst));

        collection.store(ResolutionInfo::from_fn(|| {
            Arc::new(DisposeTester { disposed: AtomicBool::new(false) })
        }));
        assert!(tester.disposed.load(Ordering::SeqCst));
    }

    #[test]
    fn test_get_prefers_unique_unnamed_entry() {
        let mut collection = ConfigurationCollection::new();
        collection.store(unnamed(1).with_name("a"));
        collection.store(unnamed(2));
        collection.store(unnamed(3).with_name("b"));

        assert_eq!(collection.get().unwrap().name(), None);
        assert_eq!(*collection.get_mut().unwrap().resolve(), 2);
    }

    #[test]
    fn test_get_returns_sole_named_entry() {
        let mut collection = ConfigurationCollection::new();
        collection.store(unnamed(1).with_name("only"));
        assert_eq!(collection.get().unwrap().name(), Some("only"));
    }

    #[test]
    fn test_get_is_ambiguous_with_several_named_entries() {
        let mut collection = ConfigurationCollection::new();
        collection.store(unnamed(1).with_name("a"));
        collection.store(unnamed(2).with_name("b"));

        assert_eq!(
            collection.get().unwrap_err(),
            IocError::Ambiguous { abstraction: "u32", name: None, matches: 2 }
        );
    }

    #[test]
    fn test_get_named_not_found() {
        let mut collection = ConfigurationCollection::new();
        collection.store(unnamed(1));
        assert_eq!(
            collection.get_named("missing").unwrap_err(),
            IocError::NotFound { abstraction: "u32", name: "missing".to_string() }
        );
    }

    #[test]
    fn test_get_named_does_not_match_unnamed_entry() {
        let mut collection = ConfigurationCollection::new();
        collection.store(unnamed(1));
        assert!(collection.get_named("").is_err());
    }

    #[test]
    fn test_dispose_disposable_instances_clears_every_cache() {
        let tester = Arc::new(DisposeTester { disposed: AtomicBool::new(false) });
        let cached = tester.clone();

        let mut collection = ConfigurationCollection::<DisposeTester>::new();
        collection.store(
            ResolutionInfo::new(move || Instance::disposable(cached.clone()))
                .with_lifetime(Lifetime::Singleton)
                .with_name("disposable"),
        );
        collection.store(
            ResolutionInfo::from_fn(|| Arc::new(DisposeTester { disposed: AtomicBool::new(false) }))
                .with_lifetime(Lifetime::Singleton)
                .with_name("plain"),
        );
        collection.get_named_mut("disposable").unwrap().resolve();
        collection.get_named_mut("plain").unwrap().resolve();

        assert_eq!(collection.dispose_disposable_instances(), 1);
        assert!(tester.disposed.load(Ordering::SeqCst));
        assert!(collection.iter().all(|entry| entry.cached_instance().is_none()));
    }
}
