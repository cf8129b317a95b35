//! Request-issuing facility used by probes
//!
//! A [`Transport`] performs exactly one round trip to an endpoint. Any response
//! counts as success regardless of its status code; everything else is a
//! [`ProbeError`].

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::trace;

use crate::config::HttpMethod;
use crate::endpoint::Endpoint;
use crate::error::ProbeError;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one round trip to `endpoint`
    async fn round_trip(&self, endpoint: &Endpoint) -> Result<(), ProbeError>;
}

/// HTTP transport backed by one pooled `reqwest` client
pub struct HttpTransport {
    /// HTTP client (reused across requests, keeps connections pooled)
    client: reqwest::Client,

    method: reqwest::Method,

    timeout: Duration,
}

impl HttpTransport {
    /// Build the shared client with a total per-request timeout
    pub fn new(timeout: Duration, method: HttpMethod) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            method: method.into(),
            timeout,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn round_trip(&self, endpoint: &Endpoint) -> Result<(), ProbeError> {
        let response = self
            .client
            .request(self.method.clone(), endpoint.url().clone())
            .send()
            .await
            .map_err(|e| ProbeError::from_reqwest(e, self.timeout))?;

        let status = response.status();

        // Read the body to the end so the connection goes back to the pool.
        // A response already counts as success, so a broken body is ignored.
        let _ = response.bytes().await;

        trace!("{} answered with {status}", endpoint.label());
        Ok(())
    }
}
