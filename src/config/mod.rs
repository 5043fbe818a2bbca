//! Host and group configuration store.
//!
//! [`ConfigStore`] keeps the parsed contents of a single YAML file as an
//! immutable [`ConfigSnapshot`]. A reload reads and parses the whole file;
//! any read or parse failure leaves the previous snapshot published.

mod file;
mod types;

pub use file::{parse_config, read_config};
pub use types::{ConfigSnapshot, GroupConfig, HostConfig};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::LoadError;
use crate::snapshot::SnapshotCell;
use crate::traits::{ReloadOutcome, Reloadable};

/// Live view of the configuration file.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    cell: SnapshotCell<ConfigSnapshot>,
}

impl ConfigStore {
    /// Create a store and perform the initial synchronous load.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let store = Self {
            path: path.into(),
            cell: SnapshotCell::new(ConfigSnapshot::empty()),
        };
        store.reload()?;
        Ok(store)
    }

    /// Path of the configuration file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file and publish the result.
    pub fn reload(&self) -> Result<ReloadOutcome, LoadError> {
        let ticket = self.cell.begin();
        let snapshot = read_config(&self.path)?.with_generation(ticket);

        let summary = format!(
            "{} hosts, {} groups",
            snapshot.host_count(),
            snapshot.group_count()
        );

        if self.cell.publish(ticket, snapshot) {
            tracing::info!(
                path = %self.path.display(),
                generation = ticket,
                "config loaded: {}",
                summary
            );
            Ok(ReloadOutcome::published(summary))
        } else {
            tracing::debug!(generation = ticket, "config parse superseded by newer reload");
            Ok(ReloadOutcome::superseded(summary))
        }
    }

    /// Host definition from the current snapshot.
    pub fn get_host(&self, hostname: &str) -> Option<HostConfig> {
        self.cell.load().host(hostname).cloned()
    }

    /// Group definition from the current snapshot.
    pub fn get_group(&self, name: &str) -> Option<GroupConfig> {
        self.cell.load().group(name).cloned()
    }

    /// Current snapshot. Hold on to it to resolve a host and its groups
    /// against the same file version.
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        self.cell.load()
    }
}

impl Reloadable for ConfigStore {
    fn name(&self) -> &'static str {
        "config"
    }

    fn reload(&self) -> Result<ReloadOutcome, LoadError> {
        ConfigStore::reload(self)
    }
}
