//! Error types for probing and configuration

use std::fmt;
use std::time::Duration;

/// Reasons a single probe can fail
///
/// Every variant is reported as the same `fail` outcome in the exported
/// metrics; the variant only shows up in the log line.
#[derive(Debug)]
pub enum ProbeError {
    /// No response within the configured deadline
    Timeout(Duration),

    /// The request failed before a response arrived (connect, DNS, TLS, ...)
    Request(String),

    /// The probe task panicked
    Panicked(String),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Timeout(after) => write!(f, "no response after {:.3}s", after.as_secs_f64()),
            ProbeError::Request(msg) => write!(f, "request failed: {}", msg),
            ProbeError::Panicked(msg) => write!(f, "probe panicked: {}", msg),
        }
    }
}

impl std::error::Error for ProbeError {}

impl ProbeError {
    /// Classify a client error; `timeout` is the limit the client was built with
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout(timeout)
        } else {
            err.into()
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest hides the interesting part (refused, dns, tls) in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        ProbeError::Request(message)
    }
}

/// Errors produced while validating the configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No endpoints configured
    NoEndpoints,

    /// Endpoint could not be parsed as a URL
    InvalidUrl { url: String, reason: String },

    /// Endpoint URL has no host to attribute metrics to
    MissingHost(String),

    /// Only http and https targets can be probed
    UnsupportedScheme { url: String, scheme: String },

    /// A duration setting was zero, negative or not a number
    InvalidDuration { field: &'static str, value: f64 },

    /// `max_in_flight` was set to zero
    ZeroInFlightCap,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoEndpoints => write!(f, "at least one endpoint must be configured"),
            ConfigError::InvalidUrl { url, reason } => {
                write!(f, "invalid endpoint url '{}': {}", url, reason)
            }
            ConfigError::MissingHost(url) => write!(f, "endpoint url '{}' has no host", url),
            ConfigError::UnsupportedScheme { url, scheme } => {
                write!(f, "endpoint url '{}' uses unsupported scheme '{}'", url, scheme)
            }
            ConfigError::InvalidDuration { field, value } => {
                write!(f, "'{}' must be a positive number of seconds, got {}", field, value)
            }
            ConfigError::ZeroInFlightCap => write!(f, "'max_in_flight' must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
