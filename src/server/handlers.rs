//! Request handlers for the key endpoint.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};

use super::auth::token_from_headers;
use super::ServerState;
use crate::error::AccessError;

/// `GET /keys/{hostname}`
pub async fn get_keys(
    State(state): State<ServerState>,
    Path(hostname): Path<String>,
    headers: HeaderMap,
) -> Response {
    if hostname.is_empty() {
        return AccessError::BadRequest.into_response();
    }

    let token = token_from_headers(&headers);
    match state.resolver.resolve(&hostname, token) {
        Ok(keys) => {
            tracing::info!(
                host = %hostname,
                users = ?keys.users,
                "serving {} keys",
                keys.key_count
            );
            ([(header::CONTENT_TYPE, "text/plain")], keys.into_payload()).into_response()
        }
        Err(e) => {
            tracing::info!(host = %hostname, code = e.error_code(), "request rejected: {}", e);
            e.into_response()
        }
    }
}

/// `GET /keys/` with no hostname segment.
pub async fn missing_hostname() -> Response {
    AccessError::BadRequest.into_response()
}

/// Any method other than GET on a key route.
pub async fn method_not_allowed() -> Response {
    AccessError::MethodNotAllowed.into_response()
}
