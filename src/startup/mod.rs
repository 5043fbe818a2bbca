//! Process startup: settings, initial load, watchers and shutdown.
//!
//! # Components
//!
//! - [`config`] - `KEYSERVER_*` environment settings
//! - [`bootstrap`] - initial synchronous load and watcher startup
//!
//! # Usage
//!
//! ```ignore
//! use keyserver::startup::{Keyserver, ServerConfig};
//!
//! let settings = ServerConfig::from_env()?;
//! let server = Keyserver::start(&settings)?;
//! let resolver = server.resolver();
//! ```

pub mod bootstrap;
pub mod config;

pub use bootstrap::{load_stores, Keyserver};
pub use config::ServerConfig;

/// Completes on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
