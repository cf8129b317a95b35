//! In-memory recorder (no exposition)
//!
//! Keeps raw counters and every duration observation. Useful for:
//! - Testing probes and rounds without a Prometheus registry
//! - Asserting on individual observations rather than bucket counts

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{Outcome, Recorder};

#[derive(Debug, Default)]
struct Aggregates {
    outcomes: HashMap<(String, Outcome), u64>,
    durations: HashMap<String, Vec<f64>>,
}

#[derive(Debug, Default)]
pub struct MemoryRecorder {
    inner: Mutex<Aggregates>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Aggregates> {
        // A panicking probe must not take the aggregates down with it
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn outcome_count(&self, label: &str, outcome: Outcome) -> u64 {
        self.lock()
            .outcomes
            .get(&(label.to_string(), outcome))
            .copied()
            .unwrap_or(0)
    }

    /// All duration observations for `label`, in recording order
    pub fn durations(&self, label: &str) -> Vec<f64> {
        self.lock().durations.get(label).cloned().unwrap_or_default()
    }
}

impl Recorder for MemoryRecorder {
    fn record_outcome(&self, label: &str, outcome: Outcome) {
        *self
            .lock()
            .outcomes
            .entry((label.to_string(), outcome))
            .or_insert(0) += 1;
    }

    fn record_duration(&self, label: &str, seconds: f64) {
        self.lock()
            .durations
            .entry(label.to_string())
            .or_default()
            .push(seconds);
    }
}
