//! Core traits for the registry.

mod dispose;
mod implements;

pub use dispose::Dispose;
pub use implements::Implements;
