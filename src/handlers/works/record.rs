use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::{json, Value};

use crate::api::WorkPayload;
use crate::database::models::WorkSession;
use crate::handlers::{json_body, path_id};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/works/:id
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<WorkSession> {
    let id = path_id(id)?;
    let work = state.work_repository().select_404(id).await?;
    Ok(ApiResponse::success(work))
}

/// PUT /api/works/:id - full replace; derived totals are recomputed from this body
pub async fn put(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<WorkPayload>, JsonRejection>,
) -> ApiResult<WorkSession> {
    let id = path_id(id)?;
    let payload = json_body(body)?;
    let work = state.work_service().update(id, payload).await?;
    Ok(ApiResponse::success(work))
}

/// DELETE /api/works/:id
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Value> {
    let id = path_id(id)?;
    state.work_service().delete(id).await?;
    Ok(ApiResponse::success(json!({ "success": true })))
}
