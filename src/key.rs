//! Abstraction keys for the registry.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Key identifying an abstraction in the registry.
///
/// Wraps the [`TypeId`] of the abstraction together with its
/// `std::any::type_name` for diagnostics. Trait objects such as
/// `dyn Logger` and concrete types are keyed the same way.
///
/// Equality, ordering and hashing only look at the `TypeId`; the type name is
/// carried along for error messages and observers.
///
/// # Examples
///
/// ```rust
/// use lucid_ioc::AbstractionKey;
///
/// trait Logger: Send + Sync {}
///
/// let logger = AbstractionKey::of::<dyn Logger>();
/// let string = AbstractionKey::of::<String>();
///
/// assert_ne!(logger, string);
/// assert_eq!(logger, AbstractionKey::of::<dyn Logger>());
/// assert_eq!(string.type_name(), "alloc::string::String");
/// ```
#[derive(Clone, Copy)]
pub struct AbstractionKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl AbstractionKey {
    /// Key for the abstraction `A`.
    #[inline(always)]
    pub fn of<A: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<A>(),
            type_name: std::any::type_name::<A>(),
        }
    }

    /// The `TypeId` of the abstraction.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The `std::any::type_name` of the abstraction.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for AbstractionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AbstractionKey({})", self.type_name)
    }
}

impl fmt::Display for AbstractionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

// TypeId-only comparison; the name is diagnostic
impl PartialEq for AbstractionKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for AbstractionKey {}

impl PartialOrd for AbstractionKey {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AbstractionKey {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.type_id.cmp(&other.type_id)
    }
}

impl Hash for AbstractionKey {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}
