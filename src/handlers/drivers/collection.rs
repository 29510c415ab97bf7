use axum::extract::State;

use super::form::DriverForm;
use crate::database::models::Driver;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/drivers - all drivers, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Driver>> {
    let drivers = state.driver_repository().select_all().await?;
    Ok(ApiResponse::success(drivers))
}

/// POST /api/drivers - register a driver, optionally with a profile photo
pub async fn create(State(state): State<AppState>, form: DriverForm) -> ApiResult<Driver> {
    let driver = state.driver_service().create(form.payload, form.photo).await?;
    Ok(ApiResponse::created(driver))
}
