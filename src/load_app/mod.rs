//! Service B: the load-generating app.
//!
//! Stateless routes that simulate I/O-bound and CPU-bound work and return
//! randomized status codes, each leaving a log line behind.

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::config::WorkloadConfig;
use crate::workload::StatusTable;

use self::handlers::{cpu_task, io_task, random_status, read_item, read_root};

/// State injected into the load app handlers.
#[derive(Clone)]
pub struct LoadAppState {
    pub statuses: Arc<StatusTable>,
    pub workload: WorkloadConfig,
}

impl LoadAppState {
    pub fn new(workload: WorkloadConfig) -> Self {
        Self {
            statuses: Arc::new(StatusTable::default()),
            workload,
        }
    }
}

pub fn router(state: LoadAppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/items/{item_id}", get(read_item))
        .route("/io_task", get(io_task))
        .route("/cpu_task", get(cpu_task))
        .route("/random_status", get(random_status))
        .with_state(state)
}
