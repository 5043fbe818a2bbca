//! Keyserver - serves SSH authorized keys to hosts over HTTP.
//!
//! Hosts authenticate with a per-host token and receive the public keys of
//! the users they are granted, directly or through groups. Configuration and
//! keys are kept in memory as immutable snapshots that are rebuilt in the
//! background whenever the files on disk change.

pub mod access;
pub mod cli;
pub mod config;
pub mod error;
pub mod keyring;
pub mod server;
pub mod snapshot;
pub mod startup;
pub mod traits;
pub mod watcher;
