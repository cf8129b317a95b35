//! Probe rounds
//!
//! A round launches one probe task per endpoint, in configuration order, and
//! returns as soon as every task is spawned. Rounds never wait for each other:
//! a probe from round N may still be in flight while round N+1 is launched.
//!
//! All probe tasks are spawned on a shared [`TaskTracker`] so the scheduler can
//! drain them on shutdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Semaphore;
use tokio_util::task::TaskTracker;
use tracing::{trace, warn};

use crate::endpoint::Endpoint;
use crate::probe::Probe;

pub struct ProbeRound {
    probe: Probe,
    endpoints: Arc<[Endpoint]>,
    tracker: TaskTracker,

    /// Optional cap on probes in flight across all rounds
    permits: Option<Arc<Semaphore>>,

    /// Probes skipped because the cap was reached
    dropped: AtomicU64,
}

impl ProbeRound {
    pub fn new(probe: Probe, endpoints: Arc<[Endpoint]>) -> Self {
        Self {
            probe,
            endpoints,
            tracker: TaskTracker::new(),
            permits: None,
            dropped: AtomicU64::new(0),
        }
    }

    /// Bound the number of probes in flight; probes over the cap are dropped, not queued
    pub fn with_max_in_flight(mut self, max_in_flight: Option<usize>) -> Self {
        self.permits = max_in_flight.map(|max| Arc::new(Semaphore::new(max)));
        self
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Spawn one probe per endpoint and return the number launched
    pub fn launch(&self) -> usize {
        let mut launched = 0;

        for endpoint in self.endpoints.iter() {
            let permit = match &self.permits {
                Some(permits) => match permits.clone().try_acquire_owned() {
                    Ok(permit) => Some(permit),
                    Err(_) => {
                        warn!("in-flight cap reached, dropping probe for {}", endpoint.label());
                        self.dropped.fetch_add(1, Ordering::Relaxed);
                        continue;
                    }
                },
                None => None,
            };

            let probe = self.probe.clone();
            let endpoint = endpoint.clone();

            self.tracker.spawn(async move {
                probe.run(&endpoint).await;
                drop(permit);
            });
            launched += 1;
        }

        trace!("launched {launched} probes");
        launched
    }

    /// Probes currently running
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Wait for every in-flight probe to resolve
    ///
    /// Every probe resolves within its deadline, so this is bounded by the
    /// probe timeout.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}
