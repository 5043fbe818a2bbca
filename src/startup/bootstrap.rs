//! Initial load of both stores and startup of their watchers.

use std::sync::Arc;

use super::config::ServerConfig;
use crate::access::AccessResolver;
use crate::config::ConfigStore;
use crate::error::StartupError;
use crate::keyring::KeyRegistry;
use crate::traits::Reloadable;
use crate::watcher::{spawn_watcher, Debouncer, WatchHandle, WatchTarget};

/// Load the config file and keyring synchronously.
///
/// Both must load for the server to start.
pub fn load_stores(settings: &ServerConfig) -> Result<(Arc<ConfigStore>, Arc<KeyRegistry>), StartupError> {
    let config = ConfigStore::load(&settings.config_path).map_err(StartupError::Config)?;
    let keyring = KeyRegistry::load(&settings.keyring_path).map_err(StartupError::Keyring)?;
    Ok((Arc::new(config), Arc::new(keyring)))
}

/// Loaded stores plus the watchers keeping them current.
#[derive(Debug)]
pub struct Keyserver {
    config: Arc<ConfigStore>,
    keyring: Arc<KeyRegistry>,
    watchers: Vec<WatchHandle>,
}

impl Keyserver {
    /// Load both stores and start watching the config file and keyring.
    ///
    /// Must be called from within a Tokio runtime. Watchers stop when the
    /// returned value is dropped.
    pub fn start(settings: &ServerConfig) -> Result<Self, StartupError> {
        let (config, keyring) = load_stores(settings)?;

        let config_watcher = watch(
            WatchTarget::File(settings.config_path.clone()),
            config.clone(),
            settings.config_debounce,
        )?;
        let keyring_watcher = watch(
            WatchTarget::Tree(settings.keyring_path.clone()),
            keyring.clone(),
            settings.keyring_debounce,
        )?;

        Ok(Self {
            config,
            keyring,
            watchers: vec![config_watcher, keyring_watcher],
        })
    }

    /// Resolver reading from this server's stores.
    pub fn resolver(&self) -> AccessResolver {
        AccessResolver::new(Arc::clone(&self.config), Arc::clone(&self.keyring))
    }

    pub fn config_store(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    pub fn keyring(&self) -> &Arc<KeyRegistry> {
        &self.keyring
    }

    pub fn watchers(&self) -> &[WatchHandle] {
        &self.watchers
    }
}

fn watch(
    target: WatchTarget,
    store: Arc<dyn Reloadable>,
    interval: std::time::Duration,
) -> Result<WatchHandle, StartupError> {
    let path = target.watch_path().to_path_buf();
    let debouncer = Arc::new(Debouncer::new(store, interval));
    spawn_watcher(target, debouncer).map_err(|source| StartupError::Watcher { path, source })
}
