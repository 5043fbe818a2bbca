//! Errors raised while loading configuration or keyring state from disk.
//!
//! A `LoadError` is fatal when it happens during the initial load and is
//! logged and absorbed when it happens during a background reload. Per-entry
//! variants (`InvalidKey`, `ReadFile`) only ever skip the single entry.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons an SSH authorized-key line can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    /// The file holds no key line (only blank or comment lines).
    #[error("no key line found")]
    Empty,

    /// The key line could not be parsed.
    #[error("malformed key line: {message}")]
    Malformed { message: String },
}

/// Failure to load a snapshot (or one entry of it) from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A directory could not be listed.
    #[error("failed to list directory '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the host/group schema.
    #[error("failed to parse config '{}': {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A `.pub` file does not hold a valid authorized-key line.
    #[error("invalid key in '{}': {source}", path.display())]
    InvalidKey {
        path: PathBuf,
        #[source]
        source: KeyParseError,
    },
}

impl LoadError {
    /// Whether this error only affects a single entry of a reload pass.
    pub fn is_per_entry(&self) -> bool {
        matches!(self, LoadError::ReadFile { .. } | LoadError::InvalidKey { .. })
    }

    /// Path the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::ReadDir { path, .. }
            | LoadError::ReadFile { path, .. }
            | LoadError::ParseConfig { path, .. }
            | LoadError::InvalidKey { path, .. } => path,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            LoadError::ReadDir { .. } => "E_LOAD_READ_DIR",
            LoadError::ReadFile { .. } => "E_LOAD_READ_FILE",
            LoadError::ParseConfig { .. } => "E_LOAD_PARSE_CONFIG",
            LoadError::InvalidKey { .. } => "E_LOAD_INVALID_KEY",
        }
    }
}
