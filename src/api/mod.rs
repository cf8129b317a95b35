//! Metrics exposition server
//!
//! ## Endpoints
//!
//! - `GET /metrics` - Prometheus text exposition of the probe metrics
//! - `GET /health` - Liveness check with the configured endpoint labels

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use state::ApiState;
pub use types::HealthResponse;

use std::net::SocketAddr;

use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the router serving all metrics routes
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/metrics", get(routes::metrics::render_metrics))
        .route("/health", get(routes::health::health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Spawn the metrics server
///
/// This binds the listener, starts serving in a background task and
/// returns the bound address (useful with port 0).
pub async fn spawn_metrics_server(bind_addr: SocketAddr, state: ApiState) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind metrics server to {bind_addr}"))?;
    let addr = listener.local_addr()?;

    info!("metrics server listening on {}", addr);

    let app = router(state);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("metrics server error: {}", e);
        }
    });

    Ok(addr)
}
