use crate::state::Frontier;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use url::Url;

/// Shared mutable state for one crawl invocation
///
/// Owns the frontier, the visited/outbound/broken ledgers, and the in-flight
/// fetch counter behind a single internal mutex. Workers hold an `Arc` to
/// this struct and go through its methods, so every check-then-mutate
/// sequence (duplicate enqueue guard, first-sighting check for outbound
/// links, dequeue-plus-in-flight accounting) happens under one lock
/// acquisition. Critical sections are brief and never held across an await.
#[derive(Debug, Default)]
pub struct CrawlState {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    frontier: Frontier,
    visited: HashSet<Url>,
    outbound: HashSet<Url>,
    broken: HashSet<Url>,
    in_flight: usize,
}

/// Counters snapshot used for progress logging
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub pages_scanned: usize,
    pub frontier_len: usize,
    pub outbound: usize,
    pub broken: usize,
}

/// Final contents of the ledgers, consumed by the result aggregator
#[derive(Debug)]
pub struct LedgerSnapshot {
    pub pages_scanned: usize,
    pub outbound: Vec<Url>,
    pub broken: Vec<Url>,
}

impl CrawlState {
    /// Creates the state for a crawl, seeding the frontier
    pub fn new(seed: Url) -> Self {
        let state = Self::default();
        state.lock().frontier.enqueue(seed);
        state
    }

    // A poisoned lock means a worker panicked mid-update; the sets are
    // insert-only so the data is still coherent. Recovering keeps the
    // never-abort invariant.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes the next target off the frontier, counting it as in flight
    ///
    /// Dequeue and increment are one atomic step so that an empty frontier
    /// plus a zero in-flight count reliably means the crawl is finished.
    pub fn next_target(&self) -> Option<Url> {
        let mut inner = self.lock();
        let target = inner.frontier.dequeue()?;
        inner.in_flight += 1;
        Some(target)
    }

    /// Marks one in-flight target as fully processed
    pub fn target_done(&self) {
        let mut inner = self.lock();
        debug_assert!(inner.in_flight > 0);
        inner.in_flight = inner.in_flight.saturating_sub(1);
    }

    /// True when the frontier is empty and nothing is being processed
    pub fn is_idle(&self) -> bool {
        let inner = self.lock();
        inner.frontier.is_empty() && inner.in_flight == 0
    }

    /// Adds an in-scope target to the frontier; false if it was seen before
    pub fn enqueue(&self, target: Url) -> bool {
        self.lock().frontier.enqueue(target)
    }

    /// Records a successfully fetched and parsed page
    pub fn mark_visited(&self, target: Url) {
        self.lock().visited.insert(target);
    }

    pub fn is_visited(&self, target: &Url) -> bool {
        self.lock().visited.contains(target)
    }

    /// Records an outbound link; true if this is its first sighting
    ///
    /// Membership is unconditional and independent of liveness. The boolean
    /// is the caller's signal to submit exactly one verification probe.
    pub fn record_outbound(&self, target: Url) -> bool {
        self.lock().outbound.insert(target)
    }

    /// Records a broken link (404 or transport failure, internal or external)
    pub fn record_broken(&self, target: Url) {
        self.lock().broken.insert(target);
    }

    pub fn progress(&self) -> Progress {
        let inner = self.lock();
        Progress {
            pages_scanned: inner.visited.len(),
            frontier_len: inner.frontier.len(),
            outbound: inner.outbound.len(),
            broken: inner.broken.len(),
        }
    }

    /// Drains the ledgers for report assembly once the crawl is done
    pub fn take_snapshot(&self) -> LedgerSnapshot {
        let mut inner = self.lock();
        let inner = std::mem::take(&mut *inner);
        LedgerSnapshot {
            pages_scanned: inner.visited.len(),
            outbound: inner.outbound.into_iter().collect(),
            broken: inner.broken.into_iter().collect(),
        }
    }
}
