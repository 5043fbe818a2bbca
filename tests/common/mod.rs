//! Common test utilities for integration tests.
//!
//! Provides a temporary config file + keyring tree and a set of valid
//! public keys.
//!
//! # Example
//!
//! ```ignore
//! let fixture = Fixture::new();
//! fixture.write_config(EXAMPLE_CONFIG);
//! fixture.add_key("alice", "laptop.pub", ALICE_KEY);
//! let resolver = fixture.resolver();
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use keyserver::access::AccessResolver;
use keyserver::config::ConfigStore;
use keyserver::keyring::KeyRegistry;
use keyserver::startup::ServerConfig;
use tempfile::TempDir;

pub const ALICE_KEY: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAICvYBsl/DgCvGh/DMo+nY6kmlyPI24+sT5OvcdsYbW6Q alice@laptop";
pub const BOB_KEY: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIIG2N9j80sbaY1nmljEToRcN55XktyW4TR4LTP2exYzp bob@desktop";
pub const CAROL_KEY: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIEwm2QdMJ9ie3lknDArBS3HgcbFSOVGfdUdLLzumNIH1 carol@work";
pub const DAVE_KEY: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGHqCAP4hTUjt3fUFKzjEwzU0/kt4s1/+GlcM315wu7u dave@home";

/// Host `web1` (token `tok-a`) gets alice directly and bob through `ops`.
pub const EXAMPLE_CONFIG: &str = r#"
hosts:
  web1:
    token: tok-a
    users: [alice]
    groups: [ops]
  db1:
    token: tok-d
    users: [carol]
    groups: [ops, nonexistent]
groups:
  ops:
    users: [bob, alice]
"#;

/// A key line as it appears in a served payload.
pub fn line(key: &str) -> String {
    format!("{}\n", key)
}

/// Temporary directory holding `config.yaml` and `keyring/`.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// Empty config file and empty keyring directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("keyring")).unwrap();
        fs::write(dir.path().join("config.yaml"), "").unwrap();
        Self { dir }
    }

    /// The example deployment: EXAMPLE_CONFIG plus keys for alice and bob.
    pub fn example() -> Self {
        let fixture = Self::new();
        fixture.write_config(EXAMPLE_CONFIG);
        fixture.add_key("alice", "laptop.pub", ALICE_KEY);
        fixture.add_key("bob", "desktop.pub", BOB_KEY);
        fixture
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.yaml")
    }

    pub fn keyring_path(&self) -> PathBuf {
        self.dir.path().join("keyring")
    }

    pub fn write_config(&self, yaml: &str) {
        fs::write(self.config_path(), yaml).unwrap();
    }

    pub fn add_key(&self, user: &str, file: &str, contents: &str) {
        let user_dir = self.keyring_path().join(user);
        fs::create_dir_all(&user_dir).unwrap();
        fs::write(user_dir.join(file), contents).unwrap();
    }

    pub fn remove_key(&self, user: &str, file: &str) {
        fs::remove_file(self.keyring_path().join(user).join(file)).unwrap();
    }

    /// Settings pointing at this fixture with short debounce intervals.
    pub fn settings(&self) -> ServerConfig {
        ServerConfig::default()
            .with_config_path(self.config_path())
            .with_keyring_path(self.keyring_path())
            .with_bind_address("127.0.0.1".parse().unwrap())
            .with_port(0)
            .with_config_debounce(Duration::from_millis(100))
            .with_keyring_debounce(Duration::from_millis(150))
    }

    pub fn stores(&self) -> (Arc<ConfigStore>, Arc<KeyRegistry>) {
        let config = ConfigStore::load(self.config_path()).expect("config should load");
        let keyring = KeyRegistry::load(self.keyring_path()).expect("keyring should load");
        (Arc::new(config), Arc::new(keyring))
    }

    pub fn resolver(&self) -> AccessResolver {
        let (config, keyring) = self.stores();
        AccessResolver::new(config, keyring)
    }
}

/// Poll `condition` every 20ms until it holds or `timeout` elapses.
pub async fn wait_until<F>(timeout: Duration, condition: F) -> bool
where
    F: Fn() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}
