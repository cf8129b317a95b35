//! Prometheus scrape endpoint

use axum::{extract::State, http::header, response::IntoResponse};
use prometheus::TEXT_FORMAT;

use crate::api::{error::ApiResult, state::ApiState};

/// GET /metrics
///
/// Renders the current counters and histograms in the text exposition format
pub async fn render_metrics(State(state): State<ApiState>) -> ApiResult<impl IntoResponse> {
    let body = state.recorder.render()?;
    Ok(([(header::CONTENT_TYPE, TEXT_FORMAT)], body))
}
