//! Memory log handlers for the REST API.
//!
//! POST /log    - store one memory log
//! GET  /recall - filtered, sorted, limited read

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};

use recall_types::memory::{MemoryLog, NewMemoryLog, RecallFilter};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /log - Store a memory log and return it with server-assigned fields.
pub async fn create_memory_log(
    State(state): State<AppState>,
    payload: Result<Json<NewMemoryLog>, JsonRejection>,
) -> Result<Json<MemoryLog>, AppError> {
    let Json(body) = payload?;

    let log = state
        .memory_service
        .log(body)
        .await
        .map_err(|e| AppError::memory("Failed to create memory log", e))?;

    Ok(Json(log))
}

/// GET /recall - Recall memory logs matching the query string filters.
pub async fn recall_memories(
    State(state): State<AppState>,
    query: Result<Query<RecallFilter>, QueryRejection>,
) -> Result<Json<Vec<MemoryLog>>, AppError> {
    let Query(filter) = query?;

    let logs = state
        .memory_service
        .recall(filter)
        .await
        .map_err(|e| AppError::memory("Failed to recall memories", e))?;

    Ok(Json(logs))
}
