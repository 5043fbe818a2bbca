//! Per-user public key registry backed by a keyring directory.
//!
//! The keyring is laid out as `<root>/<username>/<anything>.pub`, one
//! authorized-key line per file. [`KeyRegistry`] holds the current
//! [`UserKeyringSnapshot`] and replaces it wholesale on every reload:
//!
//! 1. list user directories under the root (files at the root are ignored)
//! 2. list `.pub` files in each user directory
//! 3. validate each file, skipping (and logging) the ones that fail
//! 4. drop users left with no keys
//! 5. publish the new map in one swap
//!
//! Readers are never blocked by the scan; they keep seeing the previous
//! snapshot until step 5.

mod loader;
mod record;
mod snapshot;

pub use loader::scan_keyring;
pub use record::{parse_key_file, ParsedKeyFile, PublicKeyRecord};
pub use snapshot::UserKeyringSnapshot;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::LoadError;
use crate::snapshot::SnapshotCell;
use crate::traits::{ReloadOutcome, Reloadable};

/// File name suffix of key files inside a user directory.
pub const KEY_FILE_SUFFIX: &str = ".pub";

/// Live view of the keyring directory.
#[derive(Debug)]
pub struct KeyRegistry {
    root: PathBuf,
    cell: SnapshotCell<UserKeyringSnapshot>,
}

impl KeyRegistry {
    /// Create a registry and perform the initial synchronous load.
    ///
    /// Fails if the keyring root cannot be listed.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let registry = Self {
            root: root.into(),
            cell: SnapshotCell::new(UserKeyringSnapshot::empty()),
        };
        registry.reload()?;
        Ok(registry)
    }

    /// Keyring root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rescan the keyring and publish the result.
    ///
    /// On error the previously published snapshot stays in effect.
    pub fn reload(&self) -> Result<ReloadOutcome, LoadError> {
        let ticket = self.cell.begin();
        let users = scan_keyring(&self.root)?;
        let snapshot = UserKeyringSnapshot::new(users, ticket);

        let summary = format!(
            "{} users, {} keys",
            snapshot.user_count(),
            snapshot.key_count()
        );

        if self.cell.publish(ticket, snapshot) {
            tracing::info!(
                root = %self.root.display(),
                generation = ticket,
                "keyring loaded: {}",
                summary
            );
            Ok(ReloadOutcome::published(summary))
        } else {
            tracing::debug!(generation = ticket, "keyring scan superseded by newer reload");
            Ok(ReloadOutcome::superseded(summary))
        }
    }

    /// Ordered keys for `username` from the current snapshot (empty if none).
    pub fn get_keys(&self, username: &str) -> Vec<PublicKeyRecord> {
        self.cell.load().keys(username).to_vec()
    }

    /// Current snapshot. Hold on to it to read several users consistently.
    pub fn snapshot(&self) -> Arc<UserKeyringSnapshot> {
        self.cell.load()
    }
}

impl Reloadable for KeyRegistry {
    fn name(&self) -> &'static str {
        "keyring"
    }

    fn reload(&self) -> Result<ReloadOutcome, LoadError> {
        KeyRegistry::reload(self)
    }
}
