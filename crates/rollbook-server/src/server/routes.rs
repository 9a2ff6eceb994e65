//! JSON routes over the record store and the averaging engine.
//!
//! Per-record parse failures never surface here: `/averages` always answers
//! 200 with a possibly-partial map, and skipped records are simply absent.
//! Only structural faults (unreadable store, mis-sized queue, a panicked
//! worker) become error responses.

use crate::server::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use rollbook::{AverageResult, Error, Record, RecordUpdate, compute_averages_from};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/records", get(list_records).post(insert_record))
        .route(
            "/records/{roll_no}",
            get(read_record).put(update_record).delete(delete_record),
        )
        .route("/averages", get(averages))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Store or engine failure carried to an HTTP response.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            // A snapshot that outgrew the queue is a configuration fault,
            // not a malformed request.
            Error::QueueCapacityExceeded { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

async fn list_records(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(state.store.list_all()?))
}

async fn read_record(
    State(state): State<AppState>,
    Path(roll_no): Path<String>,
) -> Result<Json<Record>, ApiError> {
    Ok(Json(state.store.get(&roll_no)?))
}

async fn insert_record(
    State(state): State<AppState>,
    Json(record): Json<Record>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    state.store.upsert(record.clone())?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_record(
    State(state): State<AppState>,
    Path(roll_no): Path<String>,
    Json(update): Json<RecordUpdate>,
) -> Result<Json<Record>, ApiError> {
    Ok(Json(state.store.update(&roll_no, update)?))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(roll_no): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&roll_no)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Runs the averaging engine over a fresh snapshot of the store.
///
/// The engine spawns and joins OS threads, so it runs on the blocking pool
/// rather than a runtime worker.
async fn averages(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, AverageResult>>, ApiError> {
    let store = Arc::clone(&state.store);
    let pool = state.pool;
    let result = tokio::task::spawn_blocking(move || compute_averages_from(&pool, store.as_ref()))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "averaging task aborted");
            ApiError::internal("averaging task aborted")
        })?;
    Ok(Json(result?))
}
