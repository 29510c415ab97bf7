use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Decoded token payload, attached to requests that passed the gate
#[derive(Clone, Debug)]
pub struct ManagerSession {
    pub role: String,
    pub expires_at: i64,
}

impl From<Claims> for ManagerSession {
    fn from(claims: Claims) -> Self {
        Self {
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}

/// Rejects requests without a valid manager token; otherwise stores a
/// `ManagerSession` in the request extensions and continues.
pub async fn require_manager(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;
    let claims = state.gate.verify(token)?;

    request.extensions_mut().insert(ManagerSession::from(claims));
    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing auth header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    let mut parts = auth_str.split_whitespace();
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().ok_or_else(|| ApiError::unauthorized("Missing token"))?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        ));
    }
    Ok(token)
}
