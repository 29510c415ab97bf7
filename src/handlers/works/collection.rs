use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};

use crate::api::{WorkListQuery, WorkPayload};
use crate::database::models::{WorkSession, WorkSessionWithDriver};
use crate::database::WorkFilter;
use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/works?driverId=&machine=&dateFrom=&dateTo=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<WorkListQuery>,
) -> ApiResult<Vec<WorkSessionWithDriver>> {
    let filter = WorkFilter::try_from(query)?;
    tracing::debug!("Listing work sessions with {:?}", filter);

    let works = state.work_repository().select_any(&filter).await?;
    Ok(ApiResponse::success(works))
}

/// POST /api/works - record a work session (rejects exact duplicates)
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<WorkPayload>, JsonRejection>,
) -> ApiResult<WorkSession> {
    let payload = json_body(body)?;
    let work = state.work_service().create(payload).await?;
    Ok(ApiResponse::created(work))
}
