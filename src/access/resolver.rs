//! Host -> authorized keys resolution.

use std::collections::HashSet;
use std::sync::Arc;

use super::payload::AuthorizedKeys;
use crate::config::{ConfigSnapshot, ConfigStore, HostConfig};
use crate::error::AccessError;
use crate::keyring::{KeyRegistry, UserKeyringSnapshot};

/// Answers "which keys may this host see" from the two live stores.
///
/// Cheap to clone; every clone shares the same stores. Each call reads one
/// config snapshot and one keyring snapshot, so a single answer never mixes
/// two versions of the same store.
#[derive(Debug, Clone)]
pub struct AccessResolver {
    config: Arc<ConfigStore>,
    keyring: Arc<KeyRegistry>,
}

impl AccessResolver {
    pub fn new(config: Arc<ConfigStore>, keyring: Arc<KeyRegistry>) -> Self {
        Self { config, keyring }
    }

    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    pub fn keyring(&self) -> &Arc<KeyRegistry> {
        &self.keyring
    }

    /// Resolve the key payload for `hostname`.
    ///
    /// `token` is `None` when the request carried no usable Authorization
    /// header. Host existence is checked before the token.
    pub fn resolve(&self, hostname: &str, token: Option<&str>) -> Result<AuthorizedKeys, AccessError> {
        let config = self.config.snapshot();
        let keyring = self.keyring.snapshot();
        resolve_with(&config, &keyring, hostname, token)
    }
}

/// Resolve against explicit snapshots.
pub fn resolve_with(
    config: &ConfigSnapshot,
    keyring: &UserKeyringSnapshot,
    hostname: &str,
    token: Option<&str>,
) -> Result<AuthorizedKeys, AccessError> {
    let host = config.host(hostname).ok_or(AccessError::HostNotFound)?;

    match token {
        Some(token) if host.token_matches(token) => {}
        _ => return Err(AccessError::Unauthorized),
    }

    let mut users = Vec::new();
    for user in candidate_users(config, host) {
        if keyring.contains_user(user) {
            users.push(user.to_string());
        } else {
            tracing::info!(host = %hostname, user = %user, "no valid keys found for user");
        }
    }

    if users.is_empty() {
        return Err(AccessError::NoAuthorizedUsers);
    }
    tracing::info!(host = %hostname, users = ?users, "found {} users", users.len());

    let mut payload = String::new();
    let mut key_count = 0;
    for user in &users {
        for key in keyring.keys(user) {
            payload.push_str(key.as_str());
            key_count += 1;
        }
    }

    if key_count == 0 {
        return Err(AccessError::NoValidKeys);
    }

    Ok(AuthorizedKeys {
        users,
        key_count,
        payload,
    })
}

/// Direct users first, then each referenced group's users, deduplicated
/// by first occurrence. Unknown groups are skipped.
pub fn candidate_users<'a>(config: &'a ConfigSnapshot, host: &'a HostConfig) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let groups = host
        .groups()
        .iter()
        .filter_map(|name| config.group(name))
        .flat_map(|group| group.users());

    host.users()
        .iter()
        .chain(groups)
        .map(String::as_str)
        .filter(|user| seen.insert(*user))
        .collect()
}
