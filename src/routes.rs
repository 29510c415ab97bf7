use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers;
use crate::middleware::require_manager;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/auth", auth_routes())
        .nest("/api/drivers", driver_routes(&state))
        .nest("/api/works", work_routes(&state))
        .nest_service("/uploads", ServeDir::new(state.uploads.dir()))
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(&config.security.cors_origin))
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
        )
        .with_state(state);

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(handlers::auth::login))
}

fn driver_routes(state: &AppState) -> Router<AppState> {
    use handlers::drivers;

    let public = Router::new()
        .route("/", get(drivers::collection_get))
        .route("/:id", get(drivers::record_get));

    let protected = Router::new()
        .route("/", post(drivers::collection_post))
        .route("/:id", axum::routing::put(drivers::record_put).delete(drivers::record_delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_manager));

    public.merge(protected)
}

fn work_routes(state: &AppState) -> Router<AppState> {
    use handlers::works;

    let public = Router::new()
        .route("/", get(works::collection_get))
        .route("/:id", get(works::record_get));

    let protected = Router::new()
        .route("/", post(works::collection_post))
        .route("/:id", axum::routing::put(works::record_put).delete(works::record_delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_manager));

    public.merge(protected)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid FRONTEND_ORIGIN '{}'", origin);
            layer
        }
    }
}

async fn root() -> &'static str {
    "Driver Management API"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "database unavailable" })),
            )
        }
    }
}
