//! HTTP server exposing `GET /keys/{hostname}`.
//!
//! | Outcome | Status |
//! |---------|--------|
//! | keys found | 200, `text/plain` body of key lines |
//! | no hostname segment | 400 |
//! | missing/malformed Authorization or wrong token | 401 |
//! | unknown host, no authorized users, no keys | 404 |
//! | method other than GET | 405 |

pub mod auth;
mod handlers;

use std::future::Future;
use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use crate::access::AccessResolver;
use crate::error::StartupError;

/// Shared state for request handlers.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub resolver: AccessResolver,
}

/// Build the router.
pub fn router(resolver: AccessResolver) -> Router {
    let state = ServerState { resolver };

    Router::new()
        .route(
            "/keys/*hostname",
            get(handlers::get_keys).fallback(handlers::method_not_allowed),
        )
        .route(
            "/keys/",
            get(handlers::missing_hostname).fallback(handlers::method_not_allowed),
        )
        .route(
            "/keys",
            get(handlers::missing_hostname).fallback(handlers::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listening socket.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, StartupError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })
}

/// Serve requests on `listener` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, resolver: AccessResolver, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Key server listening on http://{}", addr);
    }
    axum::serve(listener, router(resolver))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Start the server on `addr` in a background task.
///
/// Returns the task handle and the bound address, which differs from `addr`
/// when binding to port 0.
pub async fn start_server_on(
    addr: SocketAddr,
    resolver: AccessResolver,
) -> Result<(JoinHandle<()>, SocketAddr), StartupError> {
    let listener = bind(addr).await?;
    let actual_addr = listener
        .local_addr()
        .map_err(|source| StartupError::Bind { addr, source })?;

    let handle = tokio::spawn(async move {
        if let Err(e) = serve(listener, resolver, std::future::pending()).await {
            tracing::error!("Key server error: {}", e);
        }
    });

    Ok((handle, actual_addr))
}
