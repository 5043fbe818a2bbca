//! Full rescan of a keyring tree shaped `<root>/<username>/<file>.pub`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::record::{parse_key_file, PublicKeyRecord};
use super::KEY_FILE_SUFFIX;
use crate::error::LoadError;

/// Scan the keyring root and return every user's accepted keys.
///
/// Only a failure to list `root` itself is an error. Unreadable user
/// directories, unreadable files and invalid keys are logged and skipped.
/// Users and key files are visited in lexicographic order.
pub fn scan_keyring(root: &Path) -> Result<BTreeMap<String, Vec<PublicKeyRecord>>, LoadError> {
    let entries = sorted_entries(root).map_err(|source| LoadError::ReadDir {
        path: root.to_path_buf(),
        source,
    })?;

    let mut users = BTreeMap::new();
    for (username, user_dir) in entries {
        if !user_dir.is_dir() {
            continue;
        }
        match load_user_keys(&user_dir) {
            Ok(keys) if keys.is_empty() => {
                tracing::debug!(user = %username, "no valid keys, user omitted");
            }
            Ok(keys) => {
                users.insert(username, keys);
            }
            Err(e) => {
                tracing::warn!(
                    user = %username,
                    code = e.error_code(),
                    error = %e,
                    "skipping user"
                );
            }
        }
    }

    Ok(users)
}

/// Load every valid `.pub` file in one user's directory.
fn load_user_keys(user_dir: &Path) -> Result<Vec<PublicKeyRecord>, LoadError> {
    let entries = sorted_entries(user_dir).map_err(|source| LoadError::ReadDir {
        path: user_dir.to_path_buf(),
        source,
    })?;

    let mut keys = Vec::new();
    for (name, path) in entries {
        if !name.ends_with(KEY_FILE_SUFFIX) {
            continue;
        }
        match load_key_file(&path) {
            Ok(record) => keys.push(record),
            Err(e) => {
                tracing::warn!(code = e.error_code(), error = %e, "skipping key file");
            }
        }
    }

    Ok(keys)
}

fn load_key_file(path: &Path) -> Result<PublicKeyRecord, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_key_file(&contents).map_err(|source| LoadError::InvalidKey {
        path: path.to_path_buf(),
        source,
    })?;

    if parsed.ignored_lines > 0 {
        tracing::warn!(
            path = %path.display(),
            ignored = parsed.ignored_lines,
            "key file holds more than one key line, only the first is served"
        );
    }

    tracing::debug!(
        path = %path.display(),
        algorithm = parsed.record.algorithm(),
        fingerprint = parsed.record.fingerprint(),
        "loaded key"
    );
    Ok(parsed.record)
}

/// Directory entries as (name, path), sorted by name.
///
/// Hidden entries and names that are not valid UTF-8 are left out.
fn sorted_entries(dir: &Path) -> std::io::Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 name");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        entries.push((name, entry.path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}
