//! API shared state

use std::sync::Arc;

use crate::endpoint::Endpoint;
use crate::recorder::PrometheusRecorder;

#[derive(Clone)]
pub struct ApiState {
    /// Recorder shared with the probes
    pub recorder: PrometheusRecorder,

    /// Configured probe targets
    pub endpoints: Arc<[Endpoint]>,
}

impl ApiState {
    pub fn new(recorder: PrometheusRecorder, endpoints: Arc<[Endpoint]>) -> Self {
        Self { recorder, endpoints }
    }
}
