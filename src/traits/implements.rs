//! Compile-time relation between implementations and abstractions.

use std::sync::Arc;

/// Marks `Self` as an implementation of the abstraction `A`.
///
/// [`Registry::configure`](crate::Registry::configure) requires
/// `I: Implements<A>` so that a configuration can only pair an abstraction
/// with a type satisfying it. The conversion is an ordinary unsizing
/// coercion from `Arc<I>` to `Arc<A>`; no runtime cast is involved.
///
/// Every type implements `Implements<Self>`, so concrete types can be
/// registered as their own abstraction. For trait objects use the
/// [`implements!`](crate::implements) macro.
///
/// # Examples
///
/// ```
/// use lucid_ioc::{Implements, Registry};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// #[derive(Default)]
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "Hello!".to_string()
///     }
/// }
///
/// // Hand-written equivalent of `implements!(dyn Greeter => English);`
/// impl Implements<dyn Greeter> for English {
///     fn into_abstraction(self: Arc<Self>) -> Arc<dyn Greeter> {
///         self
///     }
/// }
///
/// let mut registry = Registry::new();
/// registry.configure::<dyn Greeter, English>();
/// assert_eq!(registry.get_instance::<dyn Greeter>().unwrap().greet(), "Hello!");
/// ```
pub trait Implements<A: ?Sized>: Send + Sync + 'static {
    /// Converts a shared implementation into the shared abstraction.
    fn into_abstraction(self: Arc<Self>) -> Arc<A>;
}

impl<T: Send + Sync + 'static> Implements<T> for T {
    #[inline(always)]
    fn into_abstraction(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// Declares that one or more types implement a trait-object abstraction.
///
/// Expands to an [`Implements`](crate::Implements) impl per listed type.
///
/// # Examples
///
/// ```
/// use lucid_ioc::{implements, Registry};
///
/// trait Sender: Send + Sync {
///     fn channel(&self) -> &'static str;
/// }
///
/// #[derive(Default)]
/// struct Email;
/// #[derive(Default)]
/// struct Sms;
///
/// impl Sender for Email {
///     fn channel(&self) -> &'static str { "email" }
/// }
/// impl Sender for Sms {
///     fn channel(&self) -> &'static str { "sms" }
/// }
///
/// implements!(dyn Sender => Email, Sms);
///
/// let mut registry = Registry::new();
/// registry.configure::<dyn Sender, Email>().named("email");
/// registry.configure::<dyn Sender, Sms>().named("sms");
///
/// assert_eq!(registry.get_named_instance::<dyn Sender>("sms").unwrap().channel(), "sms");
/// ```
#[macro_export]
macro_rules! implements {
    ($abstraction:ty => $($implementation:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$abstraction> for $implementation {
                #[inline(always)]
                fn into_abstraction(
                    self: ::std::sync::Arc<Self>,
                ) -> ::std::sync::Arc<$abstraction> {
                    self
                }
            }
        )+
    };
}
