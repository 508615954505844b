use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Component status
pub async fn health_check(State(state): State<AppState>) -> Response {
    let dispatching = state.coordinator.is_dispatching();
    let database = match state.coordinator.store().ping().await {
        Ok(()) => "operational",
        Err(e) => {
            log::warn!("Health check could not reach the message store: {}", e);
            "unavailable"
        }
    };

    let clients = state.coordinator.registry().total_count().await;

    let healthy = dispatching && database == "operational";
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let health = json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "dispatcher": if dispatching { "operational" } else { "stopped" },
            "database": database,
        },
        "clients": clients,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status, Json(health)).into_response()
}

/// GET /live - Liveness probe (is the process alive?)
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe (ready to accept traffic?)
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    if state.shutdown.is_shutdown() || !state.coordinator.is_dispatching() {
        return (StatusCode::SERVICE_UNAVAILABLE, "Shutting down").into_response();
    }

    (StatusCode::OK, "Ready").into_response()
}
