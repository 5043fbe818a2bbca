//! Atomically published, immutable snapshots.
//!
//! A [`SnapshotCell`] holds the current `Arc<T>` behind a reader/writer lock.
//! Readers clone the `Arc` and release the lock immediately, so they never
//! wait on a reload. Writers build the next value off to the side and only
//! take the write lock to swap the pointer.
//!
//! Reloads are sequenced with tickets: [`SnapshotCell::begin`] hands out a
//! ticket before any disk I/O, and [`SnapshotCell::publish`] refuses a
//! ticket older than the one already published. Two overlapping reloads can
//! therefore finish in any order without an older view replacing a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Published value plus the ticket of the reload that produced it.
#[derive(Debug)]
struct Published<T> {
    value: Arc<T>,
    ticket: u64,
}

/// Lock-guarded pointer to the current immutable snapshot.
#[derive(Debug)]
pub struct SnapshotCell<T> {
    current: RwLock<Published<T>>,
    next_ticket: AtomicU64,
}

impl<T> SnapshotCell<T> {
    /// Create a cell with an initial snapshot (ticket 0).
    pub fn new(initial: T) -> Self {
        Self {
            current: RwLock::new(Published {
                value: Arc::new(initial),
                ticket: 0,
            }),
            next_ticket: AtomicU64::new(1),
        }
    }

    /// Reserve a ticket for a reload that is about to start reading disk.
    pub fn begin(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst)
    }

    /// Publish `value` built under `ticket`.
    ///
    /// Returns `false` (and drops `value`) when a reload with a newer ticket
    /// has already published.
    pub fn publish(&self, ticket: u64, value: T) -> bool {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if ticket < current.ticket {
            return false;
        }
        current.value = Arc::new(value);
        current.ticket = ticket;
        true
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<T> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current.value)
    }

    /// Ticket of the currently published snapshot.
    pub fn published_ticket(&self) -> u64 {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_value_is_published() {
        let cell = SnapshotCell::new(vec![1, 2, 3]);
        assert_eq!(*cell.load(), vec![1, 2, 3]);
        assert_eq!(cell.published_ticket(), 0);
    }

    #[test]
    fn test_publish_replaces_value() {
        let cell = SnapshotCell::new("old".to_string());
        let before = cell.load();

        let ticket = cell.begin();
        assert!(cell.publish(ticket, "new".to_string()));

        // Readers holding the old Arc keep a consistent view.
        assert_eq!(*before, "old");
        assert_eq!(*cell.load(), "new");
        assert_eq!(cell.published_ticket(), ticket);
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let cell = SnapshotCell::new(0u32);

        let slow = cell.begin();
        let fast = cell.begin();
        assert!(slow < fast);

        assert!(cell.publish(fast, 2));
        assert!(!cell.publish(slow, 1));
        assert_eq!(*cell.load(), 2);
    }

    #[test]
    fn test_concurrent_readers_during_publish() {
        let cell = Arc::new(SnapshotCell::new(vec![0u64; 64]));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cell = Arc::clone(&cell);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        let snapshot = cell.load();
                        let first = snapshot[0];
                        assert!(snapshot.iter().all(|v| *v == first));
                    }
                })
            })
            .collect();

        for round in 1..=200u64 {
            let ticket = cell.begin();
            cell.publish(ticket, vec![round; 64]);
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
