//! Metrics collection and exposition.
//!
//! # Metrics
//! - `test_app_requests_total` (counter): requests served by the test app root
//!
//! # Design Decisions
//! - Each [`AppMetrics`] owns its own Prometheus recorder instead of
//!   installing a process-global one, so routers built side by side (tests,
//!   multiple services in one process) never share counts
//! - Counter updates are atomic increments on a pre-registered handle

use metrics::{describe_counter, Counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Content type of the Prometheus text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

pub const REQUESTS_TOTAL: &str = "test_app_requests_total";

/// Registered metrics of a service plus the handle that renders them.
pub struct AppMetrics {
    handle: PrometheusHandle,
    requests: Counter,
}

impl AppMetrics {
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        let requests = metrics::with_local_recorder(&recorder, || {
            describe_counter!(REQUESTS_TOTAL, "Number of requests");
            metrics::counter!(REQUESTS_TOTAL)
        });

        Self { handle, requests }
    }

    /// Count one request to the root endpoint.
    pub fn record_request(&self) {
        self.requests.increment(1);
    }

    /// Serialize every registered metric in the text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a plain (unlabelled) sample from rendered exposition text.
pub fn sample_value(exposition: &str, name: &str) -> Option<f64> {
    exposition
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let (metric, value) = line.split_once(' ')?;
            (metric == name).then(|| value.trim().parse().ok()).flatten()
        })
}
