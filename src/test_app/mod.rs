//! Service A: the telemetry-emitting test app.
//!
//! `GET /` counts, logs and traces one unit of simulated work;
//! `GET /metrics` exposes the counter for scraping.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::config::WorkloadConfig;
use crate::observability::AppMetrics;

use self::handlers::{metrics, read_root};

/// State injected into the test app handlers.
#[derive(Clone)]
pub struct TestAppState {
    pub metrics: Arc<AppMetrics>,
    pub workload: WorkloadConfig,
}

impl TestAppState {
    pub fn new(workload: WorkloadConfig) -> Self {
        Self {
            metrics: Arc::new(AppMetrics::new()),
            workload,
        }
    }
}

pub fn router(state: TestAppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/metrics", get(metrics))
        .with_state(state)
}
