//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{
    error::ApiError,
    handlers,
    middleware::{OriginCheckLayer, SecurityHeadersLayer},
    state::AppState,
};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;

    // Fare API, same-origin callers only
    let api = Router::new()
        .route("/api/calculate", post(handlers::fare::calculate))
        .route_layer(OriginCheckLayer::new(server.allowed_origins.clone()));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(api)
        .fallback(|| async { ApiError::NotFound })
        .layer(DefaultBodyLimit::max(server.max_body_size_json_bytes))
        .layer(SecurityHeadersLayer::new())
        .with_state(state)
}
