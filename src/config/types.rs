//! Host and group configuration types.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;

/// A host allowed to fetch keys, identified by its map key (the hostname).
#[derive(Clone, PartialEq, Eq)]
pub struct HostConfig {
    token: String,
    users: Vec<String>,
    groups: Vec<String>,
}

impl HostConfig {
    pub fn new(token: impl Into<String>, users: Vec<String>, groups: Vec<String>) -> Self {
        Self {
            token: token.into(),
            users,
            groups,
        }
    }

    /// Compare a presented token against this host's token in constant time.
    ///
    /// A host configured without a token matches nothing.
    pub fn token_matches(&self, presented: &str) -> bool {
        if self.token.is_empty() {
            return false;
        }
        self.token.as_bytes().ct_eq(presented.as_bytes()).into()
    }

    /// Whether a non-empty token is configured.
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    /// Users granted directly, in config order.
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Group names referenced by this host, in config order.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

// Keep the bearer token out of logs.
impl fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConfig")
            .field("token", &"[redacted]")
            .field("users", &self.users)
            .field("groups", &self.groups)
            .finish()
    }
}

/// A named, reusable list of users.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupConfig {
    users: Vec<String>,
}

impl GroupConfig {
    pub fn new(users: Vec<String>) -> Self {
        Self { users }
    }

    /// Member usernames, in config order.
    pub fn users(&self) -> &[String] {
        &self.users
    }
}

/// Immutable view of one successfully parsed configuration file.
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    hosts: HashMap<String, HostConfig>,
    groups: HashMap<String, GroupConfig>,
    generation: u64,
    loaded_at: DateTime<Utc>,
}

impl ConfigSnapshot {
    pub fn new(hosts: HashMap<String, HostConfig>, groups: HashMap<String, GroupConfig>) -> Self {
        Self {
            hosts,
            groups,
            generation: 0,
            loaded_at: Utc::now(),
        }
    }

    /// Snapshot with no hosts and no groups.
    pub fn empty() -> Self {
        Self::new(HashMap::new(), HashMap::new())
    }

    /// Tag the snapshot with the reload sequence number that produced it.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn host(&self, hostname: &str) -> Option<&HostConfig> {
        self.hosts.get(hostname)
    }

    pub fn group(&self, name: &str) -> Option<&GroupConfig> {
        self.groups.get(name)
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Configured hostnames, sorted.
    pub fn hostnames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.hosts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
