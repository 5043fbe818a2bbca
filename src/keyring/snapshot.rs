//! Immutable username -> keys mapping produced by one keyring scan.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::record::PublicKeyRecord;

/// Keys for every user that had at least one valid key at load time.
#[derive(Debug, Clone)]
pub struct UserKeyringSnapshot {
    users: BTreeMap<String, Vec<PublicKeyRecord>>,
    generation: u64,
    loaded_at: DateTime<Utc>,
}

impl UserKeyringSnapshot {
    /// Snapshot with no users, used before the first load.
    pub fn empty() -> Self {
        Self {
            users: BTreeMap::new(),
            generation: 0,
            loaded_at: Utc::now(),
        }
    }

    /// Build a snapshot. Users with no keys are dropped.
    pub fn new(users: BTreeMap<String, Vec<PublicKeyRecord>>, generation: u64) -> Self {
        let users = users
            .into_iter()
            .filter(|(name, keys)| !name.is_empty() && !keys.is_empty())
            .collect();
        Self {
            users,
            generation,
            loaded_at: Utc::now(),
        }
    }

    /// Keys for `username`, empty if the user is unknown.
    pub fn keys(&self, username: &str) -> &[PublicKeyRecord] {
        self.users.get(username).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `username` has at least one key.
    pub fn contains_user(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Usernames in lexicographic order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn key_count(&self) -> usize {
        self.users.values().map(Vec::len).sum()
    }

    /// Reload sequence number that produced this snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl Default for UserKeyringSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
