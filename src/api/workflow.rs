//! Workflow control endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::instance::{InstanceId, InstanceStatus};
use crate::domain::pipeline::QueryInput;

/// Request to start a workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartWorkflowRequest {
    /// The natural-language question to run through the pipeline
    pub query: String,
}

/// Generic message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response after scheduling a workflow
#[derive(Debug, Serialize)]
pub struct StartWorkflowResponse {
    pub message: String,
    pub workflow_id: String,
}

/// Status of a known workflow instance
#[derive(Debug, Serialize)]
pub struct WorkflowStatusResponse {
    pub workflow_id: String,
    pub status: InstanceStatus,
}

/// Payload for a status lookup that matched nothing
#[derive(Debug, Serialize)]
pub struct WorkflowNotFoundResponse {
    pub error: String,
    pub workflow_id: String,
}

/// GET /
pub async fn service_running() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Workflow is running".to_string(),
    })
}

/// POST /workflow/start
pub async fn start_workflow(
    State(state): State<AppState>,
    Json(request): Json<StartWorkflowRequest>,
) -> Result<Json<StartWorkflowResponse>, ApiError> {
    debug!(query = %request.query, "Starting workflow");

    let id = state
        .workflow_service
        .schedule(QueryInput::new(request.query))
        .await?;

    info!(workflow_id = %id, "Workflow started");

    Ok(Json(StartWorkflowResponse {
        message: "Workflow started successfully".to_string(),
        workflow_id: id.to_string(),
    }))
}

/// GET /workflow/status/{workflow_id}
pub async fn workflow_status(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> Result<Response, ApiError> {
    // A malformed id cannot name an instance, so it reads as unknown
    let instance = match InstanceId::new(&workflow_id) {
        Ok(id) => state.workflow_service.status(&id).await?,
        Err(_) => None,
    };

    let response = match instance {
        Some(instance) => Json(WorkflowStatusResponse {
            workflow_id,
            status: instance.status(),
        })
        .into_response(),
        None => Json(WorkflowNotFoundResponse {
            error: "Workflow not found".to_string(),
            workflow_id,
        })
        .into_response(),
    };

    Ok(response)
}

/// POST /workflow/terminate/{workflow_id}
pub async fn terminate_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    // Every terminate failure surfaces as a 500 with the error's message
    let id = InstanceId::new(&workflow_id).map_err(|e| ApiError::internal(e.to_string()))?;

    state
        .workflow_service
        .terminate(&id)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    info!(workflow_id = %workflow_id, "Workflow terminated");

    Ok(Json(MessageResponse {
        message: "Workflow terminated successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::router::create_router_with_state;
    use crate::domain::instance::WorkflowInstance;
    use crate::domain::pipeline::FinalRecord;
    use crate::infrastructure::runtime::mock::MockWorkflowService;

    fn app(service: MockWorkflowService) -> axum::Router {
        create_router_with_state(AppState::new(Arc::new(service)))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_root_reports_running() {
        let app = app(MockWorkflowService::new());

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"message": "Workflow is running"}));
    }

    #[tokio::test]
    async fn test_start_workflow() {
        let app = app(MockWorkflowService::new());

        let response = app
            .oneshot(post("/workflow/start", r#"{"query": "find movies with Keanu Reeves"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Workflow started successfully");
        assert!(json["workflow_id"].as_str().unwrap().starts_with("wf-"));
    }

    #[tokio::test]
    async fn test_start_workflow_runtime_failure_is_500() {
        let app = app(MockWorkflowService::new().with_schedule_error("runtime down"));

        let response = app
            .oneshot(post("/workflow/start", r#"{"query": "find movies"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("runtime down"));
    }

    #[tokio::test]
    async fn test_start_workflow_malformed_body_is_json_error() {
        let app = app(MockWorkflowService::new());

        let response = app
            .oneshot(post("/workflow/start", r#"{"query": 42}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn test_status_known_instance() {
        let instance = WorkflowInstance::new(QueryInput::new("find movies"));
        let id = instance.id().to_string();
        let app = app(MockWorkflowService::new().with_instance(instance));

        let response = app
            .oneshot(get(&format!("/workflow/status/{}", id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["workflow_id"], id);
        assert_eq!(json["status"], "PENDING");
    }

    #[tokio::test]
    async fn test_status_unknown_instance_is_not_found_payload() {
        let app = app(MockWorkflowService::new());
        let id = InstanceId::generate();

        let response = app
            .oneshot(get(&format!("/workflow/status/{}", id)))
            .await
            .unwrap();

        // Unknown instances are reported in the body, not via HTTP status
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Workflow not found");
        assert_eq!(json["workflow_id"], id.to_string());
    }

    #[tokio::test]
    async fn test_status_malformed_id_reads_as_unknown() {
        let app = app(MockWorkflowService::new());

        let response = app
            .oneshot(get("/workflow/status/not-a-real-id"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Workflow not found");
    }

    #[tokio::test]
    async fn test_terminate_pending_instance() {
        let instance = WorkflowInstance::new(QueryInput::new("find movies"));
        let id = instance.id().to_string();
        let app = app(MockWorkflowService::new().with_instance(instance));

        let response = app
            .oneshot(post(&format!("/workflow/terminate/{}", id), "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Workflow terminated successfully");
    }

    #[tokio::test]
    async fn test_terminate_unknown_instance_is_500() {
        let app = app(MockWorkflowService::new());
        let id = InstanceId::generate();

        let response = app
            .oneshot(post(&format!("/workflow/terminate/{}", id), "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_terminate_completed_instance_is_500() {
        let mut instance = WorkflowInstance::new(QueryInput::new("find movies"));
        instance.mark_running().unwrap();
        instance
            .mark_completed(FinalRecord::failed("boom"))
            .unwrap();
        let id = instance.id().to_string();
        let app = app(MockWorkflowService::new().with_instance(instance));

        let response = app
            .oneshot(post(&format!("/workflow/terminate/{}", id), "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app(MockWorkflowService::new());

        let health = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(health.status(), StatusCode::OK);
        let json = body_json(health).await;
        assert_eq!(json["status"], "healthy");

        let ready = app.clone().oneshot(get("/ready")).await.unwrap();
        assert_eq!(ready.status(), StatusCode::OK);

        let live = app.oneshot(get("/live")).await.unwrap();
        assert_eq!(live.status(), StatusCode::OK);
    }
}
