//! Observability metrics for debounced functions.
//!
//! Counts calls, invocations per edge and cancellations so callers can see how
//! much work the debouncer is coalescing.

use crate::domain::state::Edge;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking debounce statistics.
///
/// All metrics use atomic operations for thread-safe updates and reads.
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Total number of calls to the debounced function
    calls: AtomicU64,
    /// Invocations on the leading edge
    leading: AtomicU64,
    /// Invocations on the trailing edge
    trailing: AtomicU64,
    /// Invocations forced by the max wait cap
    max_wait: AtomicU64,
    /// Invocations forced by `flush`
    flushed: AtomicU64,
    /// Cancellations that discarded an armed timer
    cancellations: AtomicU64,
    /// Timer firings ignored because the timer was no longer armed
    stale_timers: AtomicU64,
}

impl Metrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    pub(crate) fn record_call(&self) {
        self.inner.calls.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invocation(&self, edge: Edge) {
        let counter = match edge {
            Edge::Leading => &self.inner.leading,
            Edge::Trailing => &self.inner.trailing,
            Edge::MaxWait => &self.inner.max_wait,
            Edge::Flush => &self.inner.flushed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cancellation(&self) {
        self.inner.cancellations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_stale_timer(&self) {
        self.inner.stale_timers.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of calls.
    pub fn calls(&self) -> u64 {
        self.inner.calls.load(Ordering::Relaxed)
    }

    /// Get the number of invocations triggered by `edge`.
    pub fn invocations(&self, edge: Edge) -> u64 {
        match edge {
            Edge::Leading => self.inner.leading.load(Ordering::Relaxed),
            Edge::Trailing => self.inner.trailing.load(Ordering::Relaxed),
            Edge::MaxWait => self.inner.max_wait.load(Ordering::Relaxed),
            Edge::Flush => self.inner.flushed.load(Ordering::Relaxed),
        }
    }

    /// Get the number of cancellations that discarded an armed timer.
    pub fn cancellations(&self) -> u64 {
        self.inner.cancellations.load(Ordering::Relaxed)
    }

    /// Get the number of ignored timer firings.
    pub fn stale_timers(&self) -> u64 {
        self.inner.stale_timers.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calls: self.calls(),
            leading: self.invocations(Edge::Leading),
            trailing: self.invocations(Edge::Trailing),
            max_wait: self.invocations(Edge::MaxWait),
            flushed: self.invocations(Edge::Flush),
            cancellations: self.cancellations(),
            stale_timers: self.stale_timers(),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        let inner = &self.inner;
        for counter in [
            &inner.calls,
            &inner.leading,
            &inner.trailing,
            &inner.max_wait,
            &inner.flushed,
            &inner.cancellations,
            &inner.stale_timers,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    /// Total number of calls
    pub calls: u64,
    /// Leading edge invocations
    pub leading: u64,
    /// Trailing edge invocations
    pub trailing: u64,
    /// Max wait invocations
    pub max_wait: u64,
    /// Flush invocations
    pub flushed: u64,
    /// Cancellations of an armed timer
    pub cancellations: u64,
    /// Ignored timer firings
    pub stale_timers: u64,
}

impl MetricsSnapshot {
    /// Total invocations of the target across all edges.
    pub fn invocations(&self) -> u64 {
        self.leading
            .saturating_add(self.trailing)
            .saturating_add(self.max_wait)
            .saturating_add(self.flushed)
    }

    /// Fraction of calls that did not lead to an invocation (0.0 to 1.0).
    ///
    /// Returns 0.0 if no calls have been made.
    pub fn coalesce_rate(&self) -> f64 {
        if self.calls == 0 {
            return 0.0;
        }
        let coalesced = self.calls.saturating_sub(self.invocations());
        coalesced as f64 / self.calls as f64
    }
}
