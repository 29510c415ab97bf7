// Route handlers, one module per URL group.
// List and get handlers are public; create, update and delete run behind
// `middleware::require_manager` (see `routes`).
pub mod auth;
pub mod drivers;
pub mod works;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};

use crate::error::ApiError;

/// Unwrap a JSON body, reporting decode failures as 400
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))
}

/// Unwrap a numeric `:id` path segment, reporting anything else as 400
pub(crate) fn path_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    id.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("Rejected path id: {}", rejection.body_text());
        ApiError::bad_request("id must be an integer")
    })
}
