//! Change detection and debounced reloads.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │ Keyring Watcher │     │ Config Watcher  │
//! │  (recursive)    │     │ (parent dir)    │
//! └────────┬────────┘     └────────┬────────┘
//!          ▼                       ▼
//!  ┌───────────────┐       ┌───────────────┐
//!  │   Debouncer   │       │   Debouncer   │
//!  │   (1000ms)    │       │   (500ms)     │
//!  └───────┬───────┘       └───────┬───────┘
//!          ▼                       ▼
//!  ┌───────────────┐       ┌───────────────┐
//!  │  KeyRegistry  │       │  ConfigStore  │
//!  │   reload()    │       │   reload()    │
//!  └───────────────┘       └───────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let debouncer = Arc::new(Debouncer::new(keyring.clone(), Duration::from_secs(1)));
//! let handle = spawn_watcher(WatchTarget::Tree(root), debouncer)?;
//!
//! // Keep the handle alive for as long as changes should be picked up.
//! ```

mod debouncer;
mod file_watcher;
mod types;

pub use debouncer::Debouncer;
pub use file_watcher::{spawn_watcher, WatchHandle};
pub use types::WatchTarget;
