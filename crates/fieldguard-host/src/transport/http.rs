//! REST remoting handlers.
//!
//! Each route maps onto one mutating operation, runs that operation's before
//! hooks, and answers with the body the operation would receive. Persistence
//! is not part of this surface.
//!
//! - An empty request body is treated as absent.
//! - Hook errors are answered with their status code and
//!   `{"error": {"statusCode", "code", "message"}}`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::{json, Value};

use fieldguard_core::error::{FieldGuardError, Result};
use fieldguard_core::operation::Operation;

use crate::app_state::AppState;

/// Decode a request body; whitespace-only means no body.
pub fn decode_body(raw: &Bytes) -> Result<Option<Value>> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(raw)
        .map(Some)
        .map_err(|e| FieldGuardError::BadRequest(format!("invalid json body: {e}")))
}

pub fn error_response(err: &FieldGuardError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": {
                "statusCode": err.status_code(),
                "code": err.code().as_str(),
                "message": err.to_string(),
            }
        })),
    )
        .into_response()
}

async fn run(state: &AppState, model: &str, operation: Operation, raw: &Bytes) -> Response {
    let method = operation.method_string();
    let body = match decode_body(raw) {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    match state.app().invoke(model, operation, body).await {
        Ok(data) => (
            StatusCode::OK,
            Json(json!({ "model": model, "method": method, "data": data })),
        )
            .into_response(),
        Err(e) => {
            tracing::debug!(model, method = %method, code = e.code().as_str(), "operation aborted");
            error_response(&e)
        }
    }
}

pub async fn create(State(state): State<AppState>, Path(model): Path<String>, raw: Bytes) -> Response {
    run(&state, &model, Operation::Create, &raw).await
}

pub async fn upsert(State(state): State<AppState>, Path(model): Path<String>, raw: Bytes) -> Response {
    run(&state, &model, Operation::Upsert, &raw).await
}

pub async fn replace_or_create(
    State(state): State<AppState>,
    Path(model): Path<String>,
    raw: Bytes,
) -> Response {
    run(&state, &model, Operation::ReplaceOrCreate, &raw).await
}

pub async fn patch_or_create(
    State(state): State<AppState>,
    Path(model): Path<String>,
    raw: Bytes,
) -> Response {
    run(&state, &model, Operation::PatchOrCreate, &raw).await
}

pub async fn update_all(State(state): State<AppState>, Path(model): Path<String>, raw: Bytes) -> Response {
    run(&state, &model, Operation::UpdateAll, &raw).await
}

pub async fn upsert_with_where(
    State(state): State<AppState>,
    Path(model): Path<String>,
    raw: Bytes,
) -> Response {
    run(&state, &model, Operation::UpsertWithWhere, &raw).await
}

pub async fn replace_by_id(
    State(state): State<AppState>,
    Path((model, _id)): Path<(String, String)>,
    raw: Bytes,
) -> Response {
    run(&state, &model, Operation::ReplaceById, &raw).await
}

pub async fn patch_attributes(
    State(state): State<AppState>,
    Path((model, _id)): Path<(String, String)>,
    raw: Bytes,
) -> Response {
    run(&state, &model, Operation::PatchAttributes, &raw).await
}

pub async fn update_attributes(
    State(state): State<AppState>,
    Path((model, _id)): Path<(String, String)>,
    raw: Bytes,
) -> Response {
    run(&state, &model, Operation::UpdateAttributes, &raw).await
}

pub async fn update_related_by_id(
    State(state): State<AppState>,
    Path((model, _id, relation, _fk)): Path<(String, String, String, String)>,
    raw: Bytes,
) -> Response {
    run(&state, &model, Operation::update_related(relation), &raw).await
}
