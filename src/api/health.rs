//! Health check endpoints for Kubernetes probes

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::{ApiErrorResponse, Json};

/// Health response with version info
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Readiness response including the runtime's current load
#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: HealthStatus,
    pub running_instances: usize,
}

/// Simple health check - returns 200 if the service is running
/// Used for basic liveness probes
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check - verifies the workflow runtime answers
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.workflow_service.running_count().await {
        Ok(running) => (
            StatusCode::OK,
            Json(ReadyResponse {
                status: HealthStatus::Healthy,
                running_instances: running,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Liveness check - returns 200 as long as the process responds
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
