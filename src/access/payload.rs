//! The authorized-keys payload served to a host.

/// Keys a host may see, already concatenated for `authorized_keys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedKeys {
    /// Users that contributed keys, in enumeration order.
    pub users: Vec<String>,
    /// Number of key lines in `payload`.
    pub key_count: usize,
    /// Newline-terminated key lines, user by user.
    pub payload: String,
}

impl AuthorizedKeys {
    pub fn as_str(&self) -> &str {
        &self.payload
    }

    pub fn into_payload(self) -> String {
        self.payload
    }
}
