//! Single-endpoint probe
//!
//! A probe wraps one [`Transport`] round trip with timing and outcome
//! classification:
//!
//! ```text
//! started++ → round trip (deadline) → succeeded++ | fail++ → observe duration
//! ```
//!
//! Nothing escapes a probe: every failure is logged and folded into the
//! `fail` counter. A panicking transport counts as a failed round trip.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::time::Instant;
use tracing::{error, info, instrument};

use crate::endpoint::Endpoint;
use crate::error::ProbeError;
use crate::recorder::{Outcome, Recorder};
use crate::transport::Transport;

/// Result of one resolved probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReport {
    /// Either `Succeeded` or `Failed`
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// Probe executor shared by every probe task
///
/// Cloning is cheap; all clones share the transport and the recorder.
#[derive(Clone)]
pub struct Probe {
    transport: Arc<dyn Transport>,
    recorder: Arc<dyn Recorder>,

    /// Hard deadline for one round trip, independent of the transport's own timeout
    deadline: Duration,
}

impl Probe {
    pub fn new(transport: Arc<dyn Transport>, recorder: Arc<dyn Recorder>, deadline: Duration) -> Self {
        Self {
            transport,
            recorder,
            deadline,
        }
    }

    /// Probe `endpoint` once and record the outcome and duration
    #[instrument(skip_all, fields(endpoint = %endpoint.label()))]
    pub async fn run(&self, endpoint: &Endpoint) -> ProbeReport {
        let label = endpoint.label();
        let start = Instant::now();

        self.recorder.record_outcome(label, Outcome::Started);

        let outcome = match self.round_trip(endpoint).await {
            Ok(()) => Outcome::Succeeded,
            Err(e) => {
                error!("error for ping on {label}: {e}");
                Outcome::Failed
            }
        };
        self.recorder.record_outcome(label, outcome);

        let elapsed = start.elapsed();
        info!("elapsed time of {:.3}s on {label}", elapsed.as_secs_f64());
        self.recorder.record_duration(label, elapsed.as_secs_f64());

        ProbeReport { outcome, elapsed }
    }

    async fn round_trip(&self, endpoint: &Endpoint) -> Result<(), ProbeError> {
        let call = AssertUnwindSafe(self.transport.round_trip(endpoint)).catch_unwind();

        match tokio::time::timeout(self.deadline, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(panic)) => Err(ProbeError::Panicked(panic_message(panic.as_ref()))),
            Err(_) => Err(ProbeError::Timeout(self.deadline)),
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
