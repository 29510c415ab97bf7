use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use super::json_body;
use crate::api::LoginRequest;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/auth/login - exchange the manager password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let request = json_body(body)?;
    let password = request
        .password
        .ok_or_else(|| ApiError::bad_request("Password required"))?;

    let token = state.gate.login(&password).map_err(|e| {
        tracing::warn!("Manager login rejected");
        ApiError::from(e)
    })?;

    tracing::info!("Manager login succeeded");
    Ok(ApiResponse::success(LoginResponse { token }))
}
