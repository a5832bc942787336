//! Request metrics.

use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const REQUESTS_TOTAL: &str = "sensor_api_requests_total";
pub const PARAMETER_ERRORS_TOTAL: &str = "sensor_api_parameter_errors_total";
pub const REQUEST_DURATION_MS: &str = "sensor_api_request_duration_ms";

/// Install the global Prometheus recorder.
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}

/// Times one request of an endpoint. The duration is recorded on drop.
pub struct RequestTimer {
    endpoint: &'static str,
    start: Instant,
}

impl RequestTimer {
    pub fn start(endpoint: &'static str) -> Self {
        counter!(REQUESTS_TOTAL, "endpoint" => endpoint).increment(1);
        Self {
            endpoint,
            start: Instant::now(),
        }
    }
}

impl Drop for RequestTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(REQUEST_DURATION_MS, "endpoint" => self.endpoint).record(ms);
    }
}
