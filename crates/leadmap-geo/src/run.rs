//! Run tokens for superseding in-flight computations.
//!
//! Every trigger (new data, filter change, toggled view) starts a run with
//! [`RunTracker::begin`]. Starting a run supersedes all earlier ones: their
//! fetch loops stop before the next seed, and [`ReportSlot::publish`] refuses
//! results from any run older than what the slot already holds.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct RunTracker {
    latest: Arc<AtomicU64>,
}

impl RunTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run, superseding every run started before it.
    #[must_use]
    pub fn begin(&self) -> RunToken {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        RunToken {
            generation,
            run_id: Uuid::new_v4(),
            latest: Arc::clone(&self.latest),
        }
    }
}

/// Handle carried by one run.
#[derive(Debug, Clone)]
pub struct RunToken {
    generation: u64,
    run_id: Uuid,
    latest: Arc<AtomicU64>,
}

impl RunToken {
    /// `false` once a newer run has begun on the same tracker.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}

/// Holds the newest published value and its run generation.
#[derive(Debug)]
pub struct ReportSlot<T> {
    inner: Mutex<Option<(u64, T)>>,
}

impl<T> Default for ReportSlot<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }
}

impl<T: Clone> ReportSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` unless the slot already holds a result from a newer run.
    /// Returns whether the value was stored.
    pub fn publish(&self, token: &RunToken, value: T) -> bool {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((held, _)) = guard.as_ref() {
            if *held > token.generation {
                tracing::debug!(
                    run_id = %token.run_id,
                    generation = token.generation,
                    held = *held,
                    "discarding result from superseded run"
                );
                return false;
            }
        }
        *guard = Some((token.generation, value));
        true
    }

    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, v)| v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_run_supersedes_older() {
        let tracker = RunTracker::new();
        let first = tracker.begin();
        assert!(first.is_current());
        let second = tracker.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        assert!(second.generation() > first.generation());
        assert_ne!(first.run_id(), second.run_id());
    }

    #[test]
    fn cloned_tracker_shares_generations() {
        let tracker = RunTracker::new();
        let token = tracker.begin();
        let _ = tracker.clone().begin();
        assert!(!token.is_current());
    }

    #[test]
    fn slot_rejects_stale_publish() {
        let tracker = RunTracker::new();
        let slow = tracker.begin();
        let fast = tracker.begin();
        let slot = ReportSlot::new();

        assert!(slot.publish(&fast, "fresh"));
        assert!(!slot.publish(&slow, "stale"));
        assert_eq!(slot.latest(), Some("fresh"));
    }

    #[test]
    fn slot_accepts_in_order_publishes() {
        let tracker = RunTracker::new();
        let slot = ReportSlot::new();
        let a = tracker.begin();
        assert!(slot.publish(&a, 1));
        let b = tracker.begin();
        assert!(slot.publish(&b, 2));
        assert_eq!(slot.latest(), Some(2));
    }

    #[test]
    fn empty_slot_has_no_value() {
        let slot: ReportSlot<u32> = ReportSlot::new();
        assert!(slot.latest().is_none());
    }
}
