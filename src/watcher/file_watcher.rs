//! Filesystem change detection using the `notify` crate.

use std::sync::Arc;

use notify::{Event, RecommendedWatcher, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::debouncer::Debouncer;
use super::types::WatchTarget;

/// A running watcher. MUST be kept alive; dropping it stops watching.
pub struct WatchHandle {
    target: WatchTarget,
    debouncer: Arc<Debouncer>,
    task: JoinHandle<()>,
    _watcher: RecommendedWatcher,
}

impl WatchHandle {
    pub fn target(&self) -> &WatchTarget {
        &self.target
    }

    pub fn debouncer(&self) -> &Arc<Debouncer> {
        &self.debouncer
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
        self.debouncer.cancel();
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("target", &self.target)
            .field("debouncer", &self.debouncer)
            .finish()
    }
}

/// Start watching `target`, feeding relevant events to `debouncer`.
///
/// Fails if the OS watcher cannot be created or attached. Errors reported
/// by the watcher afterwards are logged and watching continues.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_watcher(target: WatchTarget, debouncer: Arc<Debouncer>) -> notify::Result<WatchHandle> {
    // notify's callback runs on its own thread; forward into the async side.
    let (tx, rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.send(res);
    })?;
    watcher.watch(target.watch_path(), target.recursive_mode())?;

    tracing::info!(
        watch = %target,
        interval_ms = debouncer.interval().as_millis() as u64,
        "watcher started"
    );

    let task = tokio::spawn(watch_loop(target.clone(), rx, Arc::clone(&debouncer)));

    Ok(WatchHandle {
        target,
        debouncer,
        task,
        _watcher: watcher,
    })
}

async fn watch_loop(
    target: WatchTarget,
    mut rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    debouncer: Arc<Debouncer>,
) {
    while let Some(res) = rx.recv().await {
        match res {
            Ok(event) if target.is_relevant(&event) => {
                tracing::trace!(watch = %target, kind = ?event.kind, paths = ?event.paths, "change detected");
                debouncer.notify();
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(watch = %target, error = %e, "watcher error");
            }
        }
    }
    tracing::debug!(watch = %target, "watch channel closed");
}
