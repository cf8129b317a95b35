//! Message types for actor communication
//!
//! Commands are sent to a specific actor via mpsc; replies come back on a
//! oneshot channel carried inside the command.

use tokio::sync::oneshot;

/// Commands that can be sent to a SchedulerActor
#[derive(Debug)]
pub enum SchedulerCommand {
    /// Launch an extra round immediately (outside the tick cadence)
    ///
    /// Replies with the number of probes launched.
    RoundNow {
        respond_to: oneshot::Sender<usize>,
    },

    /// Get scheduler statistics
    GetStats {
        respond_to: oneshot::Sender<SchedulerStats>,
    },
}

/// Scheduler statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Rounds launched since start (ticks and RoundNow)
    pub rounds_launched: u64,

    /// Probes currently in flight across all rounds
    pub probes_in_flight: usize,

    /// Probes skipped because the in-flight cap was reached
    pub probes_dropped: u64,
}
