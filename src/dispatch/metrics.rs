use std::sync::atomic::{AtomicU64, Ordering};

use super::Outcome;

/// Per-outcome receive counters.
#[derive(Debug, Default)]
pub struct RouterMetrics {
    received: AtomicU64,
    unframed: AtomicU64,
    corrupt: AtomicU64,
    unregistered: AtomicU64,
    not_addressed: AtomicU64,
    unreadable: AtomicU64,
    dispatched: AtomicU64,
}

impl RouterMetrics {
    #[inline]
    pub(crate) fn record(&self, outcome: &Outcome) {
        self.received.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Unframed => &self.unframed,
            Outcome::Corrupt => &self.corrupt,
            Outcome::Unregistered => &self.unregistered,
            Outcome::NotAddressed => &self.not_addressed,
            Outcome::Unreadable => &self.unreadable,
            Outcome::Dispatched { .. } => &self.dispatched,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            unframed: self.unframed.load(Ordering::Relaxed),
            corrupt: self.corrupt.load(Ordering::Relaxed),
            unregistered: self.unregistered.load(Ordering::Relaxed),
            not_addressed: self.not_addressed.load(Ordering::Relaxed),
            unreadable: self.unreadable.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
        }
    }
}

/// Lightweight snapshot of receive counters.
#[allow(missing_docs)]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub received: u64,
    pub unframed: u64,
    pub corrupt: u64,
    pub unregistered: u64,
    pub not_addressed: u64,
    pub unreadable: u64,
    pub dispatched: u64,
}

impl MetricsSnapshot {
    /// Messages the transport was told to stop flooding.
    #[must_use]
    pub const fn suppressed(&self) -> u64 {
        self.unframed + self.corrupt
    }
}
