//! Probe targets

use std::fmt;

use url::Url;

use crate::error::ConfigError;

/// A probe target, resolved once at startup
///
/// The label is the URL's authority without userinfo (`host` or `host:port`)
/// and is what every metric for this target is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: Url,
    label: String,
}

impl Endpoint {
    /// Parse a target URL and derive its metric label
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::UnsupportedScheme {
                    url: raw.to_string(),
                    scheme: other.to_string(),
                });
            }
        }

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ConfigError::MissingHost(raw.to_string()))?;

        // `port()` is None for the scheme's default port, even when it was written out explicitly
        let label = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self { url, label })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Metric label for this endpoint
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
