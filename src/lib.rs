//! # lucid-ioc
//!
//! A small inversion of control registry: abstractions (usually trait objects)
//! are mapped to the implementations that construct them, optionally cached as
//! singletons and optionally distinguished by name.
//!
//! ## Features
//!
//! - **Type-keyed**: abstractions are identified by their `TypeId`
//! - **Named configurations**: several implementations of one abstraction side by side
//! - **Singleton or transient**: cache the first instance or build one per resolution
//! - **Disposal**: cleanup hooks run when a cached singleton is replaced or the registry is reset
//! - **Observable**: attach observers, or the `tracing`-based [`LoggingObserver`]
//!
//! ## Quick Start
//!
//! ```rust
//! use lucid_ioc::{implements, Registry};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Default)]
//! struct English;
//! #[derive(Default)]
//! struct German;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String { "Hello!".to_string() }
//! }
//! impl Greeter for German {
//!     fn greet(&self) -> String { "Hallo!".to_string() }
//! }
//!
//! implements!(dyn Greeter => English, German);
//!
//! let mut registry = Registry::new();
//! registry.configure::<dyn Greeter, English>().as_singleton();
//! registry.configure::<dyn Greeter, German>().named("de");
//!
//! let greeter = registry.get_instance::<dyn Greeter>().unwrap();
//! assert_eq!(greeter.greet(), "Hello!");
//! assert!(Arc::ptr_eq(&greeter, &registry.get_instance::<dyn Greeter>().unwrap()));
//!
//! let german = registry.get_named_instance::<dyn Greeter>("de").unwrap();
//! assert_eq!(german.greet(), "Hallo!");
//! ```
//!
//! ## Resolution rules
//!
//! Each abstraction owns an ordered [`ConfigurationCollection`]. Within it no
//! two configurations share a name, the unnamed default counting as a name of
//! its own; configuring an existing name replaces that configuration in place
//! and disposes its cached instance.
//!
//! An unnamed lookup returns the unique unnamed configuration, or the only
//! configuration if there is exactly one. Anything else is
//! [`IocError::Ambiguous`]. Named lookups fail with [`IocError::NotFound`]
//! when the name is unknown.
//!
//! ## Disposal
//!
//! ```rust
//! use lucid_ioc::{Dispose, Registry};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! static CLOSED: AtomicUsize = AtomicUsize::new(0);
//!
//! #[derive(Default)]
//! struct Connection;
//!
//! impl Dispose for Connection {
//!     fn dispose(&self) {
//!         CLOSED.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.configure_disposable::<Connection, Connection>().as_singleton();
//! let _connection = registry.get_instance::<Connection>().unwrap();
//!
//! // Replacing the unnamed configuration disposes the cached singleton
//! registry.configure::<Connection, Connection>();
//! assert_eq!(CLOSED.load(Ordering::SeqCst), 1);
//! ```

// Module declarations
pub mod collection;
pub mod descriptors;
pub mod error;
pub mod global;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod registration;
pub mod registry;
pub mod traits;

// Re-export core types
pub use collection::ConfigurationCollection;
pub use descriptors::ConfigurationDescriptor;
pub use error::{IocError, IocResult};
pub use global::global;
pub use key::AbstractionKey;
pub use lifetime::Lifetime;
pub use observer::{LoggingObserver, RegistryObserver};
pub use registration::{Instance, ResolutionInfo};
pub use registry::{Registry, RegistryBuilder, ResolutionContext};
pub use traits::{Dispose, Implements};
