//! # Routes
//!
//! Axum router for the sandbox backend.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the sandbox router
///
/// Routes:
///   - POST /api/checkout/session - Issue a checkout session
///   - GET  /health - Health check and issued-session count
pub fn create_router(state: AppState) -> Router {
    // Local development only; any origin may call the sandbox
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new().route("/checkout/session", post(handlers::create_session));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
