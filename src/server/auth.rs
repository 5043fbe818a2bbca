//! `Authorization: Token <token>` header parsing.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

/// Scheme prefix expected in the Authorization header (case-sensitive).
pub const TOKEN_SCHEME: &str = "Token ";

/// Extract the presented token, or `None` when the header is missing,
/// not valid ASCII, or uses another scheme.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(TOKEN_SCHEME)
}
