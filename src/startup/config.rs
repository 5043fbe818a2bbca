//! Process configuration.
//!
//! Paths, listening address and debounce intervals are read from
//! `KEYSERVER_*` environment variables, each with a default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::StartupError;

pub const ENV_CONFIG_PATH: &str = "KEYSERVER_CONFIG_PATH";
pub const ENV_KEYRING_PATH: &str = "KEYSERVER_KEYRING_PATH";
pub const ENV_PORT: &str = "KEYSERVER_PORT";
pub const ENV_BIND: &str = "KEYSERVER_BIND";
pub const ENV_KEYRING_DEBOUNCE_MS: &str = "KEYSERVER_KEYRING_DEBOUNCE_MS";
pub const ENV_CONFIG_DEBOUNCE_MS: &str = "KEYSERVER_CONFIG_DEBOUNCE_MS";

/// Configuration for the key server process.
///
/// # Example
///
/// ```ignore
/// use keyserver::startup::ServerConfig;
///
/// let config = ServerConfig::default()
///     .with_config_path("/etc/keyserver/config.yaml")
///     .with_port(9000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host/group YAML file (default: `config.yaml`)
    pub config_path: PathBuf,
    /// Keyring root directory (default: `keyring`)
    pub keyring_path: PathBuf,
    /// Listening address (default: 0.0.0.0)
    pub bind_address: IpAddr,
    /// Listening port (default: 8080)
    pub port: u16,
    /// Quiet period before a keyring reload (default: 1s)
    pub keyring_debounce: Duration,
    /// Quiet period before a config reload (default: 500ms)
    pub config_debounce: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.yaml"),
            keyring_path: PathBuf::from("keyring"),
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            keyring_debounce: Duration::from_millis(1000),
            config_debounce: Duration::from_millis(500),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_keyring_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.keyring_path = path.into();
        self
    }

    pub fn with_bind_address(mut self, address: IpAddr) -> Self {
        self.bind_address = address;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_keyring_debounce(mut self, interval: Duration) -> Self {
        self.keyring_debounce = interval;
        self
    }

    pub fn with_config_debounce(mut self, interval: Duration) -> Self {
        self.config_debounce = interval;
        self
    }

    /// Socket address to listen on.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Build from the process environment.
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or empty variables
    /// keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(path) = get(ENV_CONFIG_PATH) {
            config.config_path = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_KEYRING_PATH) {
            config.keyring_path = PathBuf::from(path);
        }
        if let Some(port) = get(ENV_PORT) {
            config.port = parse_var(ENV_PORT, &port)?;
        }
        if let Some(address) = get(ENV_BIND) {
            config.bind_address = parse_var(ENV_BIND, &address)?;
        }
        if let Some(ms) = get(ENV_KEYRING_DEBOUNCE_MS) {
            config.keyring_debounce = Duration::from_millis(parse_var(ENV_KEYRING_DEBOUNCE_MS, &ms)?);
        }
        if let Some(ms) = get(ENV_CONFIG_DEBOUNCE_MS) {
            config.config_debounce = Duration::from_millis(parse_var(ENV_CONFIG_DEBOUNCE_MS, &ms)?);
        }

        Ok(config)
    }
}

fn parse_var<T>(variable: &str, value: &str) -> Result<T, StartupError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| StartupError::Environment {
        variable: variable.to_string(),
        message: format!("'{}': {}", value, e),
    })
}
