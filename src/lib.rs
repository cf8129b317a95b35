//! Continuous network-reachability probe
//!
//! Fires one round of probes per interval against a fixed set of endpoints,
//! records outcome counters and latency histograms per endpoint, and exposes
//! them for scraping.

pub mod actors;
pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod probe;
pub mod recorder;
pub mod round;
pub mod transport;
pub mod util;
