//! Request-path error types.
//!
//! These are the only errors a client ever sees. Each maps to one HTTP status
//! and a fixed plain-text body; nothing internal (paths, parse errors) leaks.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Why a key request could not be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Request path has no hostname segment.
    #[error("missing hostname")]
    BadRequest,

    /// No host with that name is configured.
    #[error("host not found")]
    HostNotFound,

    /// Authorization header missing, malformed, or token mismatch.
    #[error("unauthorized")]
    Unauthorized,

    /// The host resolves to no user that currently has keys.
    #[error("host has no authorized users")]
    NoAuthorizedUsers,

    /// Users resolved but the assembled payload holds no key lines.
    #[error("host has no valid keys")]
    NoValidKeys,

    /// HTTP method other than GET.
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl AccessError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccessError::BadRequest => StatusCode::BAD_REQUEST,
            AccessError::Unauthorized => StatusCode::UNAUTHORIZED,
            AccessError::HostNotFound
            | AccessError::NoAuthorizedUsers
            | AccessError::NoValidKeys => StatusCode::NOT_FOUND,
            AccessError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Body text returned to the client.
    pub fn user_message(&self) -> &'static str {
        match self {
            AccessError::BadRequest => "Missing hostname",
            AccessError::HostNotFound => "Host not found",
            AccessError::Unauthorized => "Invalid token",
            AccessError::NoAuthorizedUsers => "Host has no valid users",
            AccessError::NoValidKeys => "Host has no valid keys",
            AccessError::MethodNotAllowed => "Method not allowed",
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::BadRequest => "E_REQ_BAD_REQUEST",
            AccessError::HostNotFound => "E_REQ_HOST_NOT_FOUND",
            AccessError::Unauthorized => "E_REQ_UNAUTHORIZED",
            AccessError::NoAuthorizedUsers => "E_REQ_NO_USERS",
            AccessError::NoValidKeys => "E_REQ_NO_KEYS",
            AccessError::MethodNotAllowed => "E_REQ_METHOD",
        }
    }
}

impl IntoResponse for AccessError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("{}\n", self.user_message()),
        )
            .into_response()
    }
}
