//! The registry mapping abstractions to their configurations.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::collection::ConfigurationCollection;
use crate::descriptors::ConfigurationDescriptor;
use crate::error::{IocError, IocResult};
use crate::key::AbstractionKey;
use crate::observer::{Observers, RegistryObserver};
use crate::registration::ResolutionInfo;
use crate::traits::{Dispose, Implements};

mod builder;
mod context;
mod table;

pub use builder::RegistryBuilder;
pub use context::ResolutionContext;

use table::CollectionTable;

/// Registry of abstraction configurations.
///
/// Maps each abstraction (a trait object type such as `dyn Logger`, or any
/// concrete type) to the [`ConfigurationCollection`] holding its
/// configurations. Collections are created on the first `configure*` call for
/// an abstraction and dropped, after disposing their cached instances, by
/// [`reset`](Self::reset).
///
/// A `Registry` is a plain value without internal locking: create one per
/// application or per test, or use [`global`](crate::global) for a
/// process-wide instance behind a mutex.
///
/// # Examples
///
/// ```
/// use lucid_ioc::{implements, IocError, Registry};
/// use std::any::Any;
/// use std::sync::Arc;
///
/// trait Comparable: Send + Sync {
///     fn as_any(&self) -> &dyn Any;
/// }
///
/// impl Comparable for i32 {
///     fn as_any(&self) -> &dyn Any { self }
/// }
///
/// implements!(dyn Comparable => i32);
///
/// let mut registry = Registry::new();
/// assert!(!registry.is_configured::<dyn Comparable>());
///
/// registry.configure::<dyn Comparable, i32>();
/// assert!(registry.is_configured::<dyn Comparable>());
///
/// let first = registry.get_instance::<dyn Comparable>().unwrap();
/// let second = registry.get_instance::<dyn Comparable>().unwrap();
/// assert_eq!(first.as_any().downcast_ref::<i32>(), Some(&0));
/// assert!(!Arc::ptr_eq(&first, &second));
///
/// registry.reset();
/// assert!(matches!(
///     registry.get_instance::<dyn Comparable>(),
///     Err(IocError::NotConfigured(_))
/// ));
/// ```
pub struct Registry {
    collections: CollectionTable,
    observers: Observers,
}

impl Registry {
    /// Creates an empty registry without observers.
    pub fn new() -> Self {
        RegistryBuilder::new().build()
    }

    /// Starts building a registry with observers or custom storage options.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Attaches an observer to an existing registry.
    pub fn add_observer(&mut self, observer: Arc<dyn RegistryObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    // ----- Configuration -----

    /// Configures `I::default()` as an implementation of `A`.
    ///
    /// The returned context marks the configuration as a singleton or names
    /// it; the configuration is stored when the context is dropped. Storing an
    /// unnamed configuration replaces the previous unnamed one, storing a
    /// named configuration replaces the one with the same name. A cached
    /// singleton of the replaced configuration is disposed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lucid_ioc::Registry;
    ///
    /// let mut registry = Registry::new();
    /// registry.configure::<u64, u64>().as_singleton();
    /// registry.configure::<String, String>().named("empty");
    ///
    /// assert_eq!(*registry.get_instance::<u64>().unwrap(), 0);
    /// assert_eq!(*registry.get_named_instance::<String>("empty").unwrap(), "");
    /// ```
    pub fn configure<A, I>(&mut self) -> ResolutionContext<'_, A>
    where
        A: ?Sized + Send + Sync + 'static,
        I: Implements<A> + Default,
    {
        ResolutionContext::new(self, ResolutionInfo::of_default::<I>())
    }

    /// Configures `I::default()` as an implementation of `A`, running
    /// [`Dispose::dispose`] when a cached instance is evicted.
    ///
    /// Only cached singletons are disposed; transient instances belong to
    /// their callers.
    pub fn configure_disposable<A, I>(&mut self) -> ResolutionContext<'_, A>
    where
        A: ?Sized + Send + Sync + 'static,
        I: Implements<A> + Dispose + Default,
    {
        ResolutionContext::new(self, ResolutionInfo::of_disposable::<I>())
    }

    /// Configures an arbitrary factory for `A`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lucid_ioc::Registry;
    /// use std::sync::Arc;
    ///
    /// let mut registry = Registry::new();
    /// registry.configure_with::<String, _>(|| Arc::new("postgres://localhost".to_string()))
    ///     .named("database_url")
    ///     .as_singleton();
    ///
    /// let url = registry.get_named_instance::<String>("database_url").unwrap();
    /// assert_eq!(url.as_str(), "postgres://localhost");
    /// ```
    pub fn configure_with<A, F>(&mut self, factory: F) -> ResolutionContext<'_, A>
    where
        A: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<A> + Send + Sync + 'static,
    {
        ResolutionContext::new(self, ResolutionInfo::from_fn(factory))
    }

    // ----- Resolution -----

    /// Resolves the default configuration of `A`.
    ///
    /// The default is the unique unnamed configuration, or the only
    /// configuration when exactly one exists.
    ///
    /// # Errors
    ///
    /// - [`IocError::NotConfigured`] when `A` has never been configured.
    /// - [`IocError::Ambiguous`] when several configurations exist and none
    ///   is a unique unnamed default.
    ///
    /// A panicking factory unwinds through this call unchanged.
    pub fn get_instance<A>(&mut self) -> IocResult<Arc<A>>
    where
        A: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<A>(None)
    }

    /// Resolves the configuration of `A` with the given name.
    ///
    /// # Errors
    ///
    /// - [`IocError::NotConfigured`] when `A` has never been configured.
    /// - [`IocError::NotFound`] when no configuration carries `name`.
    pub fn get_named_instance<A>(&mut self, name: &str) -> IocResult<Arc<A>>
    where
        A: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<A>(Some(name))
    }

    /// Whether `A` has been configured since the registry was created or last reset.
    pub fn is_configured<A>(&self) -> bool
    where
        A: ?Sized + 'static,
    {
        self.collections.contains_key(&AbstractionKey::of::<A>())
    }

    /// The collection holding the configurations of `A`, if any.
    pub fn collection<A>(&self) -> Option<&ConfigurationCollection<A>>
    where
        A: ?Sized + Send + Sync + 'static,
    {
        self.collections
            .get(&AbstractionKey::of::<A>())
            .and_then(|collection| collection.as_any().downcast_ref::<ConfigurationCollection<A>>())
    }

    // ----- Teardown and introspection -----

    /// Disposes every cached instance and removes all configurations.
    ///
    /// Instances already handed out stay alive for as long as their callers
    /// hold them. Dropping a registry without calling `reset` does not run
    /// any cleanup hook.
    pub fn reset(&mut self) {
        for (key, collection) in self.collections.iter_mut() {
            let disposed = collection.dispose_disposable_instances();
            self.observers.disposed(key, disposed);
        }
        let abstractions = self.collections.len();
        self.collections.clear();
        self.observers.reset(abstractions);
    }

    /// Number of configured abstractions.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.len() == 0
    }

    /// Describes every configuration, abstraction by abstraction in storage
    /// order and in insertion order within an abstraction.
    pub fn descriptors(&self) -> Vec<ConfigurationDescriptor> {
        let mut descriptors = Vec::new();
        for (key, collection) in self.collections.iter() {
            collection.describe(key, &mut descriptors);
        }
        descriptors
    }

    fn store<A>(&mut self, key: AbstractionKey, entry: ResolutionInfo<A>)
    where
        A: ?Sized + Send + Sync + 'static,
    {
        let name = entry.name().map(str::to_string);
        let lifetime = entry.lifetime();

        let collection = self
            .collections
            .get_or_insert_with(key, || Box::new(ConfigurationCollection::<A>::new()));
        let replaced = match collection.as_any_mut().downcast_mut::<ConfigurationCollection<A>>() {
            Some(collection) => collection.store(entry),
            None => unreachable!("collection for {} stored under a foreign type", key),
        };

        self.observers.configured(&key, name.as_deref(), lifetime, replaced);
    }

    fn resolve<A>(&mut self, name: Option<&str>) -> IocResult<Arc<A>>
    where
        A: ?Sized + Send + Sync + 'static,
    {
        let key = AbstractionKey::of::<A>();
        if !self.observers.has_observers() {
            return lookup::<A>(&mut self.collections, &key, name).map(ResolutionInfo::resolve);
        }

        self.observers.resolving(&key, name);
        let started = Instant::now();
        match lookup::<A>(&mut self.collections, &key, name) {
            Ok(entry) => {
                let cached = entry.cached_instance().is_some();
                let instance = entry.resolve();
                self.observers.resolved(&key, name, started.elapsed(), cached);
                Ok(instance)
            }
            Err(error) => {
                self.observers.resolution_failed(&key, name, &error);
                Err(error)
            }
        }
    }
}

fn lookup<'a, A>(
    collections: &'a mut CollectionTable,
    key: &AbstractionKey,
    name: Option<&str>,
) -> IocResult<&'a mut ResolutionInfo<A>>
where
    A: ?Sized + Send + Sync + 'static,
{
    let collection = collections
        .get_mut(key)
        .ok_or(IocError::NotConfigured(key.type_name()))?
        .as_any_mut()
        .downcast_mut::<ConfigurationCollection<A>>()
        .ok_or(IocError::TypeMismatch(key.type_name()))?;

    match name {
        Some(name) => collection.get_named_mut(name),
        None => collection.get_mut(),
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abstractions: Vec<_> = self
            .collections
            .iter()
            .map(|(key, collection)| (key.type_name(), collection.len()))
            .collect();
        f.debug_struct("Registry")
            .field("abstractions", &abstractions)
            .field("observers", &self.observers.len())
            .finish()
    }
}
