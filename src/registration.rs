//! Configuration entries and the instances they produce.

use std::fmt;
use std::sync::Arc;

use crate::lifetime::Lifetime;
use crate::traits::{Dispose, Implements};

/// Cleanup hook captured when an instance is constructed.
pub(crate) type Disposer = Box<dyn FnOnce() + Send>;

/// Factory stored on a configuration.
type Constructor<A> = Box<dyn Fn() -> Instance<A> + Send + Sync>;

/// A constructed value together with its optional cleanup hook.
///
/// The hook is decided when the value is built, so eviction never has to ask
/// the value whether it can be disposed.
///
/// # Examples
///
/// ```
/// use lucid_ioc::Instance;
/// use std::sync::Arc;
///
/// let plain = Instance::new(Arc::new(5u8));
/// assert!(!plain.is_disposable());
///
/// let hooked = Instance::with_disposer(Arc::new(5u8), || println!("closing"));
/// assert!(hooked.is_disposable());
/// assert_eq!(**hooked.value(), 5);
/// ```
pub struct Instance<A: ?Sized> {
    value: Arc<A>,
    disposer: Option<Disposer>,
}

impl<A: ?Sized + 'static> Instance<A> {
    /// Wraps a value that needs no cleanup.
    pub fn new(value: Arc<A>) -> Self {
        Self { value, disposer: None }
    }

    /// Wraps a value with an explicit cleanup hook.
    pub fn with_disposer<F>(value: Arc<A>, disposer: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            value,
            disposer: Some(Box::new(disposer)),
        }
    }

    /// Wraps an implementation whose [`Dispose::dispose`] runs on eviction.
    pub fn disposable<I>(implementation: Arc<I>) -> Self
    where
        I: Implements<A> + Dispose,
    {
        let hook = Arc::clone(&implementation);
        Self::with_disposer(implementation.into_abstraction(), move || hook.dispose())
    }

    /// The shared value.
    pub fn value(&self) -> &Arc<A> {
        &self.value
    }

    /// Whether a cleanup hook was captured.
    pub fn is_disposable(&self) -> bool {
        self.disposer.is_some()
    }

    /// Runs the cleanup hook, if any, and releases the cached reference.
    ///
    /// Returns `true` when a hook ran.
    pub(crate) fn dispose(self) -> bool {
        match self.disposer {
            Some(disposer) => {
                disposer();
                true
            }
            None => false,
        }
    }
}

impl<A: ?Sized> fmt::Debug for Instance<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("value", &std::any::type_name::<A>())
            .field("disposable", &self.disposer.is_some())
            .finish()
    }
}

/// One configuration of an abstraction.
///
/// Holds the constructor, the lifetime, an optional name distinguishing it
/// from sibling configurations of the same abstraction, and the cached
/// instance once a singleton has been resolved.
///
/// Entries are normally created by [`Registry::configure`](crate::Registry::configure);
/// building them by hand is useful together with a standalone
/// [`ConfigurationCollection`](crate::ConfigurationCollection).
///
/// # Examples
///
/// ```
/// use lucid_ioc::{Lifetime, ResolutionInfo};
/// use std::sync::Arc;
///
/// let mut info = ResolutionInfo::<u32>::from_fn(|| Arc::new(7))
///     .with_lifetime(Lifetime::Singleton)
///     .with_name("seven");
///
/// assert!(info.cached_instance().is_none());
/// let first = info.resolve();
/// let second = info.resolve();
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(info.name(), Some("seven"));
/// ```
pub struct ResolutionInfo<A: ?Sized> {
    constructor: Constructor<A>,
    instance: Option<Instance<A>>,
    lifetime: Lifetime,
    name: Option<String>,
    implementation: Option<&'static str>,
}

impl<A: ?Sized + 'static> ResolutionInfo<A> {
    /// Creates a transient, unnamed configuration from a constructor.
    pub fn new<F>(constructor: F) -> Self
    where
        F: Fn() -> Instance<A> + Send + Sync + 'static,
    {
        Self {
            constructor: Box::new(constructor),
            instance: None,
            lifetime: Lifetime::Transient,
            name: None,
            implementation: None,
        }
    }

    /// Creates a configuration from a factory producing plain values.
    pub fn from_fn<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<A> + Send + Sync + 'static,
    {
        Self::new(move || Instance::new(factory()))
    }

    /// Creates a configuration constructing `I::default()`.
    pub fn of_default<I>() -> Self
    where
        I: Implements<A> + Default,
    {
        let mut info = Self::new(|| Instance::new(Arc::new(I::default()).into_abstraction()));
        info.implementation = Some(std::any::type_name::<I>());
        info
    }

    /// Creates a configuration constructing `I::default()` whose
    /// [`Dispose`] hook runs when a cached instance is evicted.
    pub fn of_disposable<I>() -> Self
    where
        I: Implements<A> + Dispose + Default,
    {
        let mut info = Self::new(|| Instance::disposable(Arc::new(I::default())));
        info.implementation = Some(std::any::type_name::<I>());
        info
    }

    /// Sets the lifetime.
    pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn set_lifetime(&mut self, lifetime: Lifetime) {
        self.lifetime = lifetime;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// The name, or `None` for the unnamed default configuration.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub fn is_singleton(&self) -> bool {
        self.lifetime.is_singleton()
    }

    /// Type name of the implementation, when it is known.
    pub fn implementation(&self) -> Option<&'static str> {
        self.implementation
    }

    /// The cached singleton instance, if one has been constructed.
    pub fn cached_instance(&self) -> Option<&Arc<A>> {
        self.instance.as_ref().map(Instance::value)
    }

    /// Returns the cached instance or constructs a new one.
    ///
    /// A newly constructed instance is cached when the configuration is a
    /// singleton. A panicking constructor unwinds through this call and
    /// leaves nothing cached.
    pub fn resolve(&mut self) -> Arc<A> {
        if let Some(instance) = &self.instance {
            return Arc::clone(instance.value());
        }

        let instance = (self.constructor)();
        let value = Arc::clone(instance.value());
        if self.lifetime.is_singleton() {
            self.instance = Some(instance);
        }
        value
    }

    /// Evicts the cached instance, running its cleanup hook if it has one.
    ///
    /// The cached reference is cleared either way. Returns `true` when a
    /// cleanup hook ran.
    pub fn dispose_instance(&mut self) -> bool {
        self.instance.take().map(Instance::dispose).unwrap_or(false)
    }
}

impl<A: ?Sized> fmt::Debug for ResolutionInfo<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionInfo")
            .field("abstraction", &std::any::type_name::<A>())
            .field("implementation", &self.implementation)
            .field("lifetime", &self.lifetime)
            .field("name", &self.name)
            .field("cached", &self.instance.is_some())
            .finish()
    }
}
