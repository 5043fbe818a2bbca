//! Validated SSH public-key records.

use std::fmt;
use std::str::FromStr;

use ssh_key::authorized_keys::Entry;
use ssh_key::HashAlg;

use crate::error::KeyParseError;

/// One validated authorized-key line, always newline-terminated.
///
/// Options and comment are kept as written; algorithm and fingerprint are
/// derived once at load time for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyRecord {
    line: String,
    algorithm: String,
    fingerprint: String,
}

impl PublicKeyRecord {
    /// The key line including its trailing newline.
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Key algorithm, e.g. `ssh-ed25519`.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// SHA256 fingerprint in OpenSSH format (`SHA256:...`).
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl fmt::Display for PublicKeyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

impl FromStr for PublicKeyRecord {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_file(s).map(|parsed| parsed.record)
    }
}

/// Result of parsing the contents of one `.pub` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKeyFile {
    /// The first key line in the file.
    pub record: PublicKeyRecord,
    /// Non-comment lines after the first key line that were not kept.
    pub ignored_lines: usize,
}

/// Parse a key file's contents as a single authorized-key line.
///
/// Blank lines and `#` comments are skipped. The first remaining line must
/// parse as an `authorized_keys` entry (with optional options prefix and
/// comment); anything after it is counted in `ignored_lines`.
pub fn parse_key_file(contents: &str) -> Result<ParsedKeyFile, KeyParseError> {
    let mut lines = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let line = lines.next().ok_or(KeyParseError::Empty)?;
    let entry = Entry::from_str(line).map_err(|e| KeyParseError::Malformed {
        message: e.to_string(),
    })?;

    let public_key = entry.public_key();
    let record = PublicKeyRecord {
        line: format!("{}\n", line),
        algorithm: public_key.algorithm().as_str().to_string(),
        fingerprint: public_key.fingerprint(HashAlg::Sha256).to_string(),
    };

    Ok(ParsedKeyFile {
        record,
        ignored_lines: lines.count(),
    })
}
