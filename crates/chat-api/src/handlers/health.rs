//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use chat_service::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with database health
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let db_healthy = state.service_context().database_ready().await;

    let response = ReadinessResponse::ready(db_healthy);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
