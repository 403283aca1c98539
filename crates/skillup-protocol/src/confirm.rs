//! Two-step confirmation for destructive actions

use std::time::{Duration, Instant};

/// Default time the second click has to arrive
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(3);

/// Result of asking to delete an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// First request; ask again to delete
    Armed,
    /// Second request within the window; go ahead
    Confirmed,
}

/// Tracks which item, if any, is waiting for its confirming click
///
/// Arming a different item replaces the pending one. A pending item expires
/// once the window has fully elapsed.
#[derive(Debug, Clone)]
pub struct DeleteConfirmation<K> {
    pending: Option<(K, Instant)>,
    window: Duration,
}

impl<K: PartialEq> Default for DeleteConfirmation<K> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl<K: PartialEq> DeleteConfirmation<K> {
    /// Tracker with a custom window
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            pending: None,
            window,
        }
    }

    /// Register a delete request for `key` made at `now`
    pub fn request(&mut self, key: K, now: Instant) -> Confirmation {
        if self.is_armed(&key, now) {
            self.pending = None;
            return Confirmation::Confirmed;
        }
        self.pending = Some((key, now));
        Confirmation::Armed
    }

    /// Whether `key` is waiting for confirmation at `now`
    #[must_use]
    pub fn is_armed(&self, key: &K, now: Instant) -> bool {
        self.pending.as_ref().is_some_and(|(pending, armed_at)| {
            pending == key && now.saturating_duration_since(*armed_at) < self.window
        })
    }

    /// The pending key, if it has not expired at `now`
    #[must_use]
    pub fn pending(&self, now: Instant) -> Option<&K> {
        self.pending
            .as_ref()
            .filter(|(_, armed_at)| now.saturating_duration_since(*armed_at) < self.window)
            .map(|(key, _)| key)
    }

    /// Forget any pending request
    pub fn disarm(&mut self) {
        self.pending = None;
    }
}
