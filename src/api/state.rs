//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::runtime::WorkflowServiceTrait;

/// Application state containing shared services using dynamic dispatch
#[derive(Debug, Clone)]
pub struct AppState {
    pub workflow_service: Arc<dyn WorkflowServiceTrait>,
}

impl AppState {
    pub fn new(workflow_service: Arc<dyn WorkflowServiceTrait>) -> Self {
        Self { workflow_service }
    }
}
