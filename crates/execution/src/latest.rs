//! Keeps only the newest result of overlapping computations.
//!
//! A live preview rebuilds parameters on every edit. Each rebuild takes a
//! [`Ticket`]; a result is accepted only if no newer ticket was issued since.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation marker handed out by [`LatestOnly::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Holds the result of the most recent request.
#[derive(Debug, Default)]
pub struct LatestOnly<T> {
    generation: AtomicU64,
    latest: Mutex<Option<T>>,
}

impl<T: Clone> LatestOnly<T> {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// Starts a request, invalidating every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Stores `value` if `ticket` is still current. Returns whether it was kept.
    pub fn complete(&self, ticket: Ticket, value: T) -> bool {
        let Ok(mut latest) = self.latest.lock() else {
            return false;
        };
        // Checked under the lock so a newer completion cannot be overwritten.
        if !self.is_current(ticket) {
            return false;
        }
        *latest = Some(value);
        true
    }

    /// The last accepted result.
    pub fn latest(&self) -> Option<T> {
        self.latest.lock().ok().and_then(|latest| latest.clone())
    }
}
