//! Measurement recording
//!
//! Probes report into a [`Recorder`], passed around as a shared
//! `Arc<dyn Recorder>` handle. Two implementations exist:
//!
//! - [`PrometheusRecorder`]: the production recorder, exported on `/metrics`
//! - [`MemoryRecorder`]: plain in-memory aggregation for tests
//!
//! ## Thread Safety
//!
//! Implementations must accept concurrent `record_*` calls from many probe
//! tasks without losing updates.

pub mod memory;
pub mod registry;

pub use memory::MemoryRecorder;
pub use registry::PrometheusRecorder;

use std::fmt;

/// Outcome label of a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Probe launched, round trip not yet resolved
    Started,
    /// Round trip completed (any response)
    Succeeded,
    /// Timeout, network or protocol failure
    Failed,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Started, Outcome::Succeeded, Outcome::Failed];

    /// Value of the `status` label
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Started => "started",
            Outcome::Succeeded => "succeeded",
            Outcome::Failed => "fail",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for probe measurements, keyed by endpoint label
///
/// Recording never fails from the caller's point of view.
pub trait Recorder: Send + Sync {
    /// Increment the counter for `(label, outcome)`
    fn record_outcome(&self, label: &str, outcome: Outcome);

    /// Add one duration observation (seconds) to the label's histogram
    fn record_duration(&self, label: &str, seconds: f64);
}

/// Histogram bucket upper bounds in seconds
///
/// `0.0`, then 1..9 × 10^m for m in -3..=1 (1ms up to 90s). The `+Inf`
/// bucket is implicit.
pub fn duration_buckets() -> Vec<f64> {
    let mut buckets = vec![0.0];
    for magnitude in -3..2 {
        for i in 1u32..10 {
            let bound = f64::from(i) * 10f64.powi(magnitude);
            buckets.push((bound * 1e6).round() / 1e6);
        }
    }
    buckets
}
