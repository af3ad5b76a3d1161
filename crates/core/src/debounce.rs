//! Ticket bookkeeping for debounced input
//!
//! The timer itself lives in the shell. This module only decides which
//! scheduled value is allowed to fire: every call to [`Debouncer::schedule`]
//! supersedes the tickets issued before it.

use std::time::Duration;

/// Quiet period after the last keystroke before a search is applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Handle for one scheduled value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }

    /// Record a new value, invalidating every earlier ticket
    pub fn schedule(&mut self, value: T) -> Ticket {
        self.generation += 1;
        self.pending = Some(value);
        Ticket(self.generation)
    }

    /// Take the pending value if `ticket` is the latest one issued
    ///
    /// Stale tickets yield `None` and leave the pending value in place.
    pub fn settle(&mut self, ticket: Ticket) -> Option<T> {
        if ticket.0 == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drop the pending value without firing it
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
