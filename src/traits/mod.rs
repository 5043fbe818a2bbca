//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`Reloadable`] - a store that rebuilds its snapshot from disk

pub mod reload;

pub use reload::{ReloadOutcome, Reloadable};
