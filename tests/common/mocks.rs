//! Mock stores for watcher and debounce tests.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};
use std::time::{Duration, Instant};

use keyserver::error::LoadError;
use keyserver::traits::{ReloadOutcome, Reloadable};

/// A store that only counts reloads, optionally failing them.
#[derive(Default)]
pub struct CountingReloader {
    reloads: AtomicUsize,
    fail: AtomicBool,
    fired_at: Mutex<Vec<Instant>>,
}

impl CountingReloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent reloads fail with a read error.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    /// Instants at which reloads ran.
    pub fn fired_at(&self) -> Vec<Instant> {
        self.fired_at.lock().unwrap().clone()
    }

    /// Poll until at least `count` reloads ran or `timeout` elapses.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.reloads() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.reloads() >= count
    }
}

impl Reloadable for CountingReloader {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn reload(&self) -> Result<ReloadOutcome, LoadError> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        self.fired_at.lock().unwrap().push(Instant::now());
        if self.fail.load(Ordering::SeqCst) {
            return Err(LoadError::ReadDir {
                path: "/nonexistent".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        Ok(ReloadOutcome::published("counted"))
    }
}
