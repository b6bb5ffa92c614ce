use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::workflow;

/// Create a minimal router without state (for testing/backward compatibility)
/// Note: /ready and workflow endpoints are not available without state
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(workflow::service_running))
        // Workflow control surface
        .route("/workflow/start", post(workflow::start_workflow))
        .route("/workflow/status/{workflow_id}", get(workflow::workflow_status))
        .route(
            "/workflow/terminate/{workflow_id}",
            post(workflow::terminate_workflow),
        )
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
