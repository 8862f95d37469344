use std::time::Duration;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::load_app::LoadAppState;
use crate::workload::{burn_cpu, pause};

pub const IO_TASK_DONE: &str = "IO bound task finish!";
pub const CPU_TASK_DONE: &str = "CPU bound task finish!";

#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub item_id: i64,
    pub q: Option<String>,
}

pub async fn read_root() -> Json<Value> {
    tracing::info!("Success");
    tracing::error!("Hello World");
    Json(json!({ "Hello": "World" }))
}

pub async fn read_item(
    item_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<ItemQuery>, QueryRejection>,
) -> Result<Json<Item>, ApiError> {
    let Path(item_id) = item_id?;
    let Query(ItemQuery { q }) = query?;

    tracing::error!(item_id, "items");
    Ok(Json(Item { item_id, q }))
}

pub async fn io_task(State(state): State<LoadAppState>) -> &'static str {
    let workload = &state.workload;
    pause(workload.delay_mode, Duration::from_millis(workload.io_delay_ms)).await;
    tracing::error!("io task");
    IO_TASK_DONE
}

pub async fn cpu_task(State(state): State<LoadAppState>) -> &'static str {
    burn_cpu(state.workload.cpu_iterations);
    tracing::error!("cpu task");
    CPU_TASK_DONE
}

pub async fn random_status(State(state): State<LoadAppState>) -> (StatusCode, Json<Value>) {
    let status = state.statuses.choose();
    tracing::error!(status = status.as_u16(), "random status");
    (status, Json(json!({ "path": "/random_status" })))
}
