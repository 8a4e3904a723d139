//! API Routes
//!
//! Configures the Axum routers for both front-ends.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::counter::hit_counter_handler;
use super::handlers::{get_handler, health_handler, list_handler, set_handler, AppState};

/// Creates the router for the generic key-value front-end.
///
/// # Endpoints
/// - `GET /` - All key-value pairs
/// - `POST /set/:key/:value` - Store a value
/// - `GET /get/:key` - Retrieve a value by key
/// - `GET /health` - Health check endpoint
///
/// Unknown paths fall through to axum's default 404.
pub fn create_store_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_handler))
        .route("/set/:key/:value", post(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Creates the router for the hit counter front-end.
pub fn create_counter_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hit_counter_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
