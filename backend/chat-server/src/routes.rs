use crate::{AppState, health, history, join, leave, metrics, poll, send};

use axum::{
    Router,
    routing::{any, get},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Chat endpoints, any method
        .route("/join", any(join))
        .route("/send", any(send))
        .route("/leave", any(leave))
        .route("/messages", any(history))
        .route("/poll", any(poll))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(metrics::metrics_handler))
        // Add shared state
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
