//! Health endpoints: a liveness probe that always answers and a readiness
//! probe that exercises the storage façade.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

/// Liveness: the process is up and serving.
pub async fn live() -> impl IntoResponse {
    Json(json!({ "status": "up" }))
}

/// Readiness: storage answers a trivial read.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.storage.banks().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "up", "checks": { "storage": "healthy" } })),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "down", "checks": { "storage": "unhealthy" } })),
        ),
    }
}

/// Combined health report used by `GET /health`.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let storage_status = match state.storage.banks().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };
    let healthy = storage_status == "healthy";
    (
        if healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        },
        Json(json!({
            "status": if healthy { "healthy" } else { "unhealthy" },
            "backend": state.config.storage_backend,
            "checks": { "storage": storage_status },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
