//! Errors that prevent the server from starting.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use super::load::LoadError;

/// Fatal startup failure. The process must not serve requests after one.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Initial configuration load failed.
    #[error("failed to load config: {0}")]
    Config(#[source] LoadError),

    /// Initial keyring load failed.
    #[error("failed to load keyring: {0}")]
    Keyring(#[source] LoadError),

    /// A filesystem watcher could not be created or attached.
    #[error("failed to watch '{}': {source}", path.display())]
    Watcher {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Environment variable set to an unusable value.
    #[error("environment variable '{variable}' error: {message}")]
    Environment { variable: String, message: String },
}

impl StartupError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StartupError::Config(_) => "E_START_CONFIG",
            StartupError::Keyring(_) => "E_START_KEYRING",
            StartupError::Watcher { .. } => "E_START_WATCHER",
            StartupError::Bind { .. } => "E_START_BIND",
            StartupError::Environment { .. } => "E_START_ENV",
        }
    }
}
