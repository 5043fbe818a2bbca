//! Reload trait abstraction.
//!
//! Decouples the filesystem watcher and debouncer from the stores they
//! refresh, so debounce behavior can be tested with a counting fake and
//! the stores can be reloaded directly in tests without a watcher.

use std::fmt;

use crate::error::LoadError;

/// Result of a successful reload pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadOutcome {
    /// Whether the new snapshot was published. `false` when a newer
    /// concurrent reload had already published.
    pub published: bool,
    /// Human-readable counts for logging, e.g. "3 hosts, 1 group".
    pub summary: String,
}

impl ReloadOutcome {
    /// Outcome for a snapshot that was published.
    pub fn published(summary: impl Into<String>) -> Self {
        Self {
            published: true,
            summary: summary.into(),
        }
    }

    /// Outcome for a snapshot that lost the race to a newer reload.
    pub fn superseded(summary: impl Into<String>) -> Self {
        Self {
            published: false,
            summary: summary.into(),
        }
    }
}

impl fmt::Display for ReloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.published {
            write!(f, "{}", self.summary)
        } else {
            write!(f, "{} (superseded)", self.summary)
        }
    }
}

/// A store that can rebuild its snapshot from disk.
///
/// `reload` performs blocking filesystem I/O and must leave the previously
/// published snapshot in place when it returns an error.
pub trait Reloadable: Send + Sync + 'static {
    /// Short store name for logs ("config", "keyring").
    fn name(&self) -> &'static str;

    /// Rebuild and publish the snapshot.
    fn reload(&self) -> Result<ReloadOutcome, LoadError>;
}
