use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::trace;

use crate::endpoint::Endpoint;
use crate::error::ConfigError;

/// HTTP method used for probe requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Head,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

/// Metrics exposition server configuration
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "crate::util::get_default_bind")]
    pub bind: SocketAddr,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            bind: crate::util::get_default_bind(),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: f64,

    /// Seconds between round launches
    #[serde(default = "default_interval")]
    pub interval: f64,

    #[serde(default)]
    pub method: HttpMethod,

    /// Upper bound on probes in flight across all rounds (unbounded if unset)
    pub max_in_flight: Option<usize>,

    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            timeout: default_timeout(),
            interval: default_interval(),
            method: HttpMethod::default(),
            max_in_flight: None,
            metrics: MetricsConfig::default(),
        }
    }
}

fn default_endpoints() -> Vec<String> {
    vec![
        "https://www.google.com".to_string(),
        "https://www.cloudflare.com".to_string(),
        "https://www.att.com".to_string(),
    ]
}

fn default_timeout() -> f64 {
    2.0
}

fn default_interval() -> f64 {
    1.0
}

/// Validated configuration, fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoints: Arc<[Endpoint]>,
    pub timeout: Duration,
    pub interval: Duration,
    pub method: HttpMethod,
    pub max_in_flight: Option<usize>,
    pub metrics_bind: SocketAddr,
}

impl Config {
    /// Validate the raw configuration and resolve every endpoint to its label
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        if self.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }

        let endpoints = self
            .endpoints
            .iter()
            .map(|raw| Endpoint::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        if self.max_in_flight == Some(0) {
            return Err(ConfigError::ZeroInFlightCap);
        }

        Ok(ResolvedConfig {
            endpoints: endpoints.into(),
            timeout: positive_secs("timeout", self.timeout)?,
            interval: positive_secs("interval", self.interval)?,
            method: self.method,
            max_in_flight: self.max_in_flight,
            metrics_bind: self.metrics.bind,
        })
    }
}

fn positive_secs(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidDuration { field, value });
    }
    Duration::try_from_secs_f64(value)
        .ok()
        .filter(|duration| !duration.is_zero())
        .ok_or(ConfigError::InvalidDuration { field, value })
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read config file '{path}'"))?;
    serde_json::from_str(&file_content)
        .with_context(|| format!("invalid configuration file '{path}'"))
        .inspect(|config| trace!("loaded config: {config:?}"))
}
