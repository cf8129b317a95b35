//! Prometheus-backed recorder
//!
//! Exposes two metric families:
//!
//! - `call_count_total{website, status}`: outcome counter
//! - `call_duration_seconds{website}`: probe duration histogram
//!
//! Both live in a private [`Registry`] so tests can create as many recorders
//! as they like without clashing on the global default registry.

use std::sync::Arc;

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::error;

use super::{Outcome, Recorder, duration_buckets};

#[derive(Clone)]
pub struct PrometheusRecorder {
    registry: Arc<Registry>,
    calls: IntCounterVec,
    durations: HistogramVec,
}

impl PrometheusRecorder {
    /// Create the recorder and register both metric families
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let calls = IntCounterVec::new(
            Opts::new("call_count_total", "Probe calls by outcome"),
            &["website", "status"],
        )?;

        let durations = HistogramVec::new(
            HistogramOpts::new("call_duration_seconds", "Time spent in call")
                .buckets(duration_buckets()),
            &["website"],
        )?;

        registry.register(Box::new(calls.clone()))?;
        registry.register(Box::new(durations.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            calls,
            durations,
        })
    }

    /// Encode all metrics in the Prometheus text exposition format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// Current counter value for `(label, outcome)`
    pub fn outcome_count(&self, label: &str, outcome: Outcome) -> u64 {
        self.calls
            .get_metric_with_label_values(&[label, outcome.as_str()])
            .map(|counter| counter.get())
            .unwrap_or(0)
    }

    /// Number of duration observations recorded for `label`
    pub fn duration_count(&self, label: &str) -> u64 {
        self.durations
            .get_metric_with_label_values(&[label])
            .map(|histogram| histogram.get_sample_count())
            .unwrap_or(0)
    }

    /// Sum of all duration observations for `label`, in seconds
    pub fn duration_sum(&self, label: &str) -> f64 {
        self.durations
            .get_metric_with_label_values(&[label])
            .map(|histogram| histogram.get_sample_sum())
            .unwrap_or(0.0)
    }
}

impl Recorder for PrometheusRecorder {
    fn record_outcome(&self, label: &str, outcome: Outcome) {
        match self
            .calls
            .get_metric_with_label_values(&[label, outcome.as_str()])
        {
            Ok(counter) => counter.inc(),
            Err(e) => error!("failed to record {outcome} for {label}: {e}"),
        }
    }

    fn record_duration(&self, label: &str, seconds: f64) {
        match self.durations.get_metric_with_label_values(&[label]) {
            Ok(histogram) => histogram.observe(seconds),
            Err(e) => error!("failed to record duration for {label}: {e}"),
        }
    }
}
