//! Request Sequencing
//!
//! Tickets tell a widget whether a settled request is still the latest
//! one it sent. Older outcomes are reported as superseded and must not
//! touch the UI.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Outcome of a tracked request
#[derive(Debug, PartialEq)]
pub enum Settled<T> {
    /// No newer request was issued while this one was in flight
    Current(T),
    Superseded(T),
}

/// Per-widget ticket counter
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at event time, before the request starts
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Relaxed) == ticket.0
    }

    /// Await `request` and classify it against tickets issued meanwhile
    pub async fn settle<F>(&self, ticket: Ticket, request: F) -> Settled<F::Output>
    where
        F: Future,
    {
        let output = request.await;
        if self.is_current(ticket) {
            Settled::Current(output)
        } else {
            Settled::Superseded(output)
        }
    }
}
