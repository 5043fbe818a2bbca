//! YAML schema of the host/group configuration file.
//!
//! ```yaml
//! hosts:
//!   web1:
//!     token: tok-a
//!     users: [alice]
//!     groups: [ops]
//! groups:
//!   ops:
//!     users: [bob]
//! ```
//!
//! Missing or null sections and lists are treated as empty. Unknown keys are
//! ignored.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::types::{ConfigSnapshot, GroupConfig, HostConfig};
use crate::error::LoadError;

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    hosts: Option<HashMap<String, Option<RawHost>>>,
    groups: Option<HashMap<String, Option<RawGroup>>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawHost {
    token: Option<String>,
    users: Option<Vec<String>>,
    groups: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGroup {
    users: Option<Vec<String>>,
}

/// Read and parse the configuration file at `path`.
pub fn read_config(path: &Path) -> Result<ConfigSnapshot, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents, path)
}

/// Parse configuration text. `path` is only used for error reporting.
///
/// Hosts with an empty or missing token are kept but never authenticate;
/// a warning is logged for each.
pub fn parse_config(contents: &str, path: &Path) -> Result<ConfigSnapshot, LoadError> {
    let raw: RawConfig = if contents.trim().is_empty() {
        RawConfig::default()
    } else {
        serde_yaml::from_str(contents).map_err(|source| LoadError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?
    };

    let mut hosts = HashMap::new();
    for (hostname, host) in raw.hosts.unwrap_or_default() {
        let host = host.unwrap_or_default();
        let token = host.token.unwrap_or_default();
        if token.is_empty() {
            tracing::warn!(host = %hostname, "host has no token, every request for it will be rejected");
        }
        hosts.insert(
            hostname,
            HostConfig::new(
                token,
                host.users.unwrap_or_default(),
                host.groups.unwrap_or_default(),
            ),
        );
    }

    let groups = raw
        .groups
        .unwrap_or_default()
        .into_iter()
        .map(|(name, group)| {
            let users = group.and_then(|g| g.users).unwrap_or_default();
            (name, GroupConfig::new(users))
        })
        .collect();

    Ok(ConfigSnapshot::new(hosts, groups))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<ConfigSnapshot, LoadError> {
        parse_config(yaml, Path::new("config.yaml"))
    }

    #[test]
    fn test_parse_full_schema() {
        let snapshot = parse(
            r#"
hosts:
  web1:
    token: tok-a
    users: [alice]
    groups: [ops]
groups:
  ops:
    users: [bob, carol]
"#,
        )
        .unwrap();

        let host = snapshot.host("web1").unwrap();
        assert!(host.token_matches("tok-a"));
        assert_eq!(host.users(), ["alice".to_string()]);
        assert_eq!(host.groups(), ["ops".to_string()]);
        assert_eq!(
            snapshot.group("ops").unwrap().users(),
            ["bob".to_string(), "carol".to_string()]
        );
    }

    #[test]
    fn test_parse_empty_file() {
        let snapshot = parse("").unwrap();
        assert_eq!(snapshot.host_count(), 0);
        assert_eq!(snapshot.group_count(), 0);
    }

    #[test]
    fn test_parse_null_sections_and_lists() {
        let snapshot = parse(
            r#"
hosts:
  web1:
    token: tok-a
    users:
groups:
"#,
        )
        .unwrap();

        let host = snapshot.host("web1").unwrap();
        assert!(host.users().is_empty());
        assert!(host.groups().is_empty());
        assert_eq!(snapshot.group_count(), 0);
    }

    #[test]
    fn test_parse_keeps_hosts_without_token() {
        let snapshot = parse(
            r#"
hosts:
  open:
    users: [alice]
  blank:
    token: ""
  ok:
    token: t
"#,
        )
        .unwrap();

        let open = snapshot.host("open").unwrap();
        assert!(!open.has_token());
        assert!(!open.token_matches(""));
        assert!(!open.token_matches("wrong"));

        let blank = snapshot.host("blank").unwrap();
        assert!(!blank.token_matches(""));
        assert!(!blank.token_matches("wrong"));

        assert!(snapshot.host("ok").unwrap().token_matches("t"));
    }

    #[test]
    fn test_parse_invalid_yaml_is_error() {
        let err = parse("hosts: [this is: not, a map").unwrap_err();
        assert!(matches!(err, LoadError::ParseConfig { .. }));
        assert_eq!(err.error_code(), "E_LOAD_PARSE_CONFIG");
    }

    #[test]
    fn test_parse_wrong_shape_is_error() {
        let err = parse("hosts:\n  web1:\n    users: alice-not-a-list\n").unwrap_err();
        assert!(matches!(err, LoadError::ParseConfig { .. }));
    }
}
