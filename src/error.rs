//! Error types for the registry.

use std::fmt;

/// Registry errors
///
/// Represents the conditions under which resolving an abstraction fails.
/// All of them are returned synchronously to the caller of
/// [`Registry::get_instance`](crate::Registry::get_instance) or
/// [`Registry::get_named_instance`](crate::Registry::get_named_instance);
/// nothing is retried and there is no fallback instance.
///
/// A factory that panics is not represented here: the panic unwinds through
/// the registry unchanged.
///
/// # Examples
///
/// ```rust
/// use lucid_ioc::{IocError, Registry};
///
/// let mut registry = Registry::new();
/// match registry.get_instance::<String>() {
///     Err(IocError::NotConfigured(type_name)) => {
///         assert_eq!(type_name, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use lucid_ioc::IocError;
///
/// let not_configured = IocError::NotConfigured("dyn app::Clock");
/// let not_found = IocError::NotFound {
///     abstraction: "dyn app::Clock",
///     name: "utc".to_string(),
/// };
///
/// println!("Error: {}", not_configured);
/// println!("Error: {}", not_found);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IocError {
    /// No configuration exists for the abstraction
    NotConfigured(&'static str),
    /// The lookup matched no unique configuration
    ///
    /// For an unnamed lookup `name` is `None` and `matches` is the number of
    /// configurations held for the abstraction, none of which is a unique
    /// unnamed default. For a named lookup `matches` counts the
    /// configurations carrying that name.
    Ambiguous {
        abstraction: &'static str,
        name: Option<String>,
        matches: usize,
    },
    /// A named lookup found no configuration with that name
    NotFound {
        abstraction: &'static str,
        name: String,
    },
    /// A stored collection did not have the expected type
    TypeMismatch(&'static str),
}

impl IocError {
    /// Name of the abstraction the failed lookup was for.
    pub fn abstraction(&self) -> &'static str {
        match self {
            IocError::NotConfigured(abstraction) => abstraction,
            IocError::Ambiguous { abstraction, .. } => abstraction,
            IocError::NotFound { abstraction, .. } => abstraction,
            IocError::TypeMismatch(abstraction) => abstraction,
        }
    }
}

impl fmt::Display for IocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IocError::NotConfigured(name) => {
                write!(f, "No instance of {} has been configured", name)
            }
            IocError::Ambiguous { abstraction, name: None, matches } => write!(
                f,
                "Ambiguous resolution of {}: {} configurations and no unique unnamed default",
                abstraction, matches
            ),
            IocError::Ambiguous { abstraction, name: Some(name), matches } => write!(
                f,
                "Ambiguous resolution of {}: {} configurations named '{}'",
                abstraction, matches, name
            ),
            IocError::NotFound { abstraction, name } => {
                write!(f, "No configuration of {} is named '{}'", abstraction, name)
            }
            IocError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
        }
    }
}

impl std::error::Error for IocError {}

/// Result type for registry operations
///
/// A convenience alias for `Result<T, IocError>`.
///
/// # Examples
///
/// ```rust
/// use lucid_ioc::{IocError, IocResult};
///
/// fn lookup(found: bool) -> IocResult<u32> {
///     if found {
///         Ok(7)
///     } else {
///         Err(IocError::NotConfigured("u32"))
///     }
/// }
///
/// assert_eq!(lookup(true).unwrap(), 7);
/// assert!(lookup(false).is_err());
/// ```
pub type IocResult<T> = Result<T, IocError>;
