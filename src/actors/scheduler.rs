//! SchedulerActor - Fires one probe round per tick
//!
//! ## Message Flow
//!
//! ```text
//! Timer tick → ProbeRound::launch → [probe task per endpoint] → Recorder
//!     ↑
//!     └─── Commands (RoundNow, GetStats) / CancellationToken
//! ```
//!
//! ## Cadence
//!
//! Rounds are launched on a fixed interval measured from launch to launch.
//! The actor never waits for a round's probes, so a slow endpoint cannot push
//! back the next tick. If the runtime stalls, missed ticks are skipped rather
//! than fired in a burst.
//!
//! ## Shutdown
//!
//! Cancelling the token stops new rounds; the actor then drains the probes
//! still in flight and marks itself stopped.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::round::ProbeRound;

use super::messages::{SchedulerCommand, SchedulerStats};

pub struct SchedulerActor {
    round: ProbeRound,

    /// Time between round launches
    interval_duration: Duration,

    /// Command receiver for control messages
    command_rx: mpsc::Receiver<SchedulerCommand>,

    /// Stops new rounds when cancelled
    shutdown: CancellationToken,

    /// Cancelled by the actor once in-flight probes are drained
    stopped: CancellationToken,

    rounds_launched: u64,
}

impl SchedulerActor {
    pub fn new(
        round: ProbeRound,
        interval_duration: Duration,
        command_rx: mpsc::Receiver<SchedulerCommand>,
        shutdown: CancellationToken,
        stopped: CancellationToken,
    ) -> Self {
        Self {
            round,
            interval_duration,
            command_rx,
            shutdown,
            stopped,
            rounds_launched: 0,
        }
    }

    /// Run the actor's main loop
    ///
    /// Runs until the shutdown token is cancelled. Dropping every handle only
    /// closes the command channel; ticking carries on.
    #[instrument(skip(self), fields(endpoints = self.round.endpoints().len()))]
    pub async fn run(mut self) {
        info!("running pinger every {:?}", self.interval_duration);

        let mut ticker = interval(self.interval_duration);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut commands_open = true;

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    debug!("shutdown requested");
                    break;
                }

                _ = ticker.tick() => {
                    self.launch_round();
                }

                cmd = self.command_rx.recv(), if commands_open => {
                    match cmd {
                        Some(SchedulerCommand::RoundNow { respond_to }) => {
                            debug!("received RoundNow command");
                            let launched = self.launch_round();
                            let _ = respond_to.send(launched);
                        }

                        Some(SchedulerCommand::GetStats { respond_to }) => {
                            let _ = respond_to.send(self.stats());
                        }

                        None => {
                            warn!("all scheduler handles dropped, rounds continue until shutdown");
                            commands_open = false;
                        }
                    }
                }
            }
        }

        let in_flight = self.round.in_flight();
        if in_flight > 0 {
            info!("waiting for {in_flight} in-flight probes");
        }
        self.round.drain().await;
        self.stopped.cancel();

        debug!("scheduler stopped after {} rounds", self.rounds_launched);
    }

    fn launch_round(&mut self) -> usize {
        self.rounds_launched += 1;
        self.round.launch()
    }

    fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            rounds_launched: self.rounds_launched,
            probes_in_flight: self.round.in_flight(),
            probes_dropped: self.round.dropped(),
        }
    }
}

/// Handle for controlling a SchedulerActor
#[derive(Clone)]
pub struct SchedulerHandle {
    sender: mpsc::Sender<SchedulerCommand>,
    shutdown: CancellationToken,
    stopped: CancellationToken,
}

impl SchedulerHandle {
    /// Spawn a new scheduler actor
    ///
    /// The first round is launched immediately.
    pub fn spawn(round: ProbeRound, interval_duration: Duration) -> Self {
        Self::spawn_with_token(round, interval_duration, CancellationToken::new())
    }

    /// Spawn a scheduler that also stops when `shutdown` is cancelled by the host
    pub fn spawn_with_token(
        round: ProbeRound,
        interval_duration: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let stopped = CancellationToken::new();

        let actor = SchedulerActor::new(
            round,
            interval_duration,
            cmd_rx,
            shutdown.clone(),
            stopped.clone(),
        );

        tokio::spawn(actor.run());

        Self {
            sender: cmd_tx,
            shutdown,
            stopped,
        }
    }

    /// Launch an extra round now; returns the number of probes launched
    pub async fn round_now(&self) -> Result<usize> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(SchedulerCommand::RoundNow { respond_to: tx })
            .await
            .context("failed to send RoundNow command")?;

        rx.await.context("failed to receive response")
    }

    pub async fn stats(&self) -> Result<SchedulerStats> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(SchedulerCommand::GetStats { respond_to: tx })
            .await
            .context("failed to send GetStats command")?;

        rx.await.context("failed to receive response")
    }

    /// Token that stops the scheduler when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Stop launching rounds and wait until in-flight probes have drained
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        self.stopped().await;
    }

    /// Wait until the scheduler has stopped and drained
    pub async fn stopped(&self) {
        self.stopped.cancelled().await;
    }
}

// ============================================================================
// Tests
// ============================================================================
