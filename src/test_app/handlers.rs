use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::Instrument;

use crate::observability::metrics::CONTENT_TYPE;
use crate::test_app::TestAppState;
use crate::workload::{pause, random_delay};

pub const GREETING: &str = "Hello from observability test app";

#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}

pub async fn read_root(State(state): State<TestAppState>) -> Json<Greeting> {
    state.metrics.record_request();
    tracing::info!("handling request");

    let workload = &state.workload;
    let delay = random_delay(workload.root_delay_min_ms, workload.root_delay_max_ms);
    let span = tracing::info_span!("process_request", delay_ms = delay.as_millis() as u64);
    pause(workload.delay_mode, delay).instrument(span).await;

    Json(Greeting { message: GREETING })
}

pub async fn metrics(State(state): State<TestAppState>) -> impl IntoResponse {
    let body = state.metrics.render();
    tracing::info!("printing metrics");
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], body)
}
