//! Debouncing of filesystem change notifications.
//!
//! Every [`Debouncer::notify`] call bumps a generation counter, cancels the
//! pending timer and schedules a new one. When a timer fires it compares its
//! generation with the current one; a stale timer discards itself instead of
//! reloading. A burst of events therefore produces a single reload once the
//! burst has been quiet for the configured interval.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::traits::Reloadable;

/// Coalesces change notifications into reloads of one store.
pub struct Debouncer {
    target: Arc<dyn Reloadable>,
    interval: Duration,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a debouncer that reloads `target` after `interval` of quiet.
    pub fn new(target: Arc<dyn Reloadable>, interval: Duration) -> Self {
        Self {
            target,
            interval,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// Quiet period before a reload fires.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of notifications received so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Record a change and (re)start the quiet-period timer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn notify(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let scheduled = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let generation = Arc::clone(&self.generation);
        let target = Arc::clone(&self.target);
        let interval = self.interval;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;

            if generation.load(Ordering::SeqCst) != scheduled {
                tracing::debug!(store = target.name(), scheduled, "debounce timer superseded");
                return;
            }

            // Detached so that a later notify() cannot cancel a reload that
            // has already started.
            tokio::task::spawn_blocking(move || run_reload(target.as_ref()));
        }));
    }

    /// Cancel the pending timer, if any. A reload already running continues.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("target", &self.target.name())
            .field("interval", &self.interval)
            .field("generation", &self.generation())
            .finish()
    }
}

/// Run one reload, logging the outcome. Errors never propagate.
fn run_reload(target: &dyn Reloadable) {
    match target.reload() {
        Ok(outcome) => {
            tracing::info!(store = target.name(), "reloaded: {}", outcome);
        }
        Err(e) => {
            tracing::error!(
                store = target.name(),
                code = e.error_code(),
                error = %e,
                "reload failed, keeping previous snapshot"
            );
        }
    }
}
