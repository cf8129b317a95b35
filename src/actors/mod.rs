//! Actor-based probe scheduling
//!
//! The scheduler runs as an independent async task and is controlled through
//! a cloneable handle, the same way every long-lived component here is wired.
//!
//! ## Architecture Overview
//!
//! ```text
//!              ┌──────────────────┐
//!              │  main (binary)   │
//!              └────────┬─────────┘
//!                       │ spawns
//!              ┌────────▼─────────┐
//!              │  SchedulerActor  │ tick every interval
//!              └────────┬─────────┘
//!                       │ ProbeRound::launch
//!        ┌──────────────┼──────────────┐
//!        │              │              │
//!  ┌─────▼─────┐  ┌─────▼─────┐  ┌─────▼─────┐
//!  │ probe (A) │  │ probe (B) │  │ probe (N) │  independent tasks
//!  └─────┬─────┘  └─────┬─────┘  └─────┬─────┘
//!        └──────────────┼──────────────┘
//!              ┌────────▼─────────┐
//!              │ Recorder (shared)│ ← scraped on /metrics
//!              └──────────────────┘
//! ```
//!
//! ## Communication Patterns
//!
//! 1. **Commands**: mpsc command channel for control messages
//! 2. **Request/Response**: oneshot channels for replies
//! 3. **Cancellation**: a `CancellationToken` stops new rounds

pub mod messages;
pub mod scheduler;
