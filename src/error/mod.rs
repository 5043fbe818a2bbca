//! Error types for the key server.
//!
//! Errors fall into four groups, each with a fixed handling policy:
//!
//! | Group | Type | Handling |
//! |-------|------|----------|
//! | Startup | [`StartupError`] | Fatal, process exits before serving |
//! | Reload | [`LoadError`] | Logged, previous snapshot stays published |
//! | Per-entry | [`LoadError`] (`is_per_entry`) | Logged, entry skipped, load continues |
//! | Request | [`AccessError`] | Returned to the client as a 400/401/404/405 |
//!
//! No internal error is ever turned into a 5xx response.

mod access;
mod load;
mod startup;

pub use access::AccessError;
pub use load::{KeyParseError, LoadError};
pub use startup::StartupError;
