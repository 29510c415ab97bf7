use axum::extract::{rejection::PathRejection, Path, State};
use serde_json::{json, Value};

use super::form::DriverForm;
use crate::database::models::Driver;
use crate::handlers::path_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/drivers/:id
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Driver> {
    let id = path_id(id)?;
    let driver = state.driver_repository().select_404(id).await?;
    Ok(ApiResponse::success(driver))
}

/// PUT /api/drivers/:id - replace a driver; the photo changes only if a new file is attached
pub async fn put(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    form: DriverForm,
) -> ApiResult<Driver> {
    let id = path_id(id)?;
    let driver = state.driver_service().update(id, form.payload, form.photo).await?;
    Ok(ApiResponse::success(driver))
}

/// DELETE /api/drivers/:id
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Value> {
    let id = path_id(id)?;
    state.driver_service().delete(id).await?;
    Ok(ApiResponse::success(json!({ "success": true })))
}
