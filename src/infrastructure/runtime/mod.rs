//! Local workflow runtime
//!
//! Schedules each pipeline run as a tokio task and tracks its lifecycle
//! through the instance repository. Termination aborts the task and records
//! the terminal status.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::task::AbortHandle;
use tracing::{info, warn};

use crate::domain::instance::{InstanceId, InstanceRepository, InstanceStatus, WorkflowInstance};
use crate::domain::pipeline::{QueryInput, QueryPipeline};
use crate::domain::DomainError;

/// Control surface over the workflow runtime
#[async_trait]
pub trait WorkflowServiceTrait: Send + Sync + std::fmt::Debug {
    /// Schedule a new instance and return its ID immediately
    async fn schedule(&self, input: QueryInput) -> Result<InstanceId, DomainError>;

    /// Fetch the current state of an instance, `None` when unknown
    async fn status(&self, id: &InstanceId) -> Result<Option<WorkflowInstance>, DomainError>;

    /// Cancel a pending or running instance
    async fn terminate(&self, id: &InstanceId) -> Result<WorkflowInstance, DomainError>;

    /// Number of instances currently executing
    async fn running_count(&self) -> Result<usize, DomainError>;
}

/// Runtime that executes pipeline runs in-process
#[derive(Debug)]
pub struct WorkflowService {
    pipeline: Arc<QueryPipeline>,
    instances: Arc<dyn InstanceRepository>,
    tasks: Arc<RwLock<HashMap<String, AbortHandle>>>,
}

impl WorkflowService {
    pub fn new(pipeline: Arc<QueryPipeline>, instances: Arc<dyn InstanceRepository>) -> Self {
        Self {
            pipeline,
            instances,
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    #[cfg(test)]
    fn tracked_tasks(&self) -> usize {
        self.tasks.read().unwrap().len()
    }
}

/// Drive one instance through the pipeline, updating stored state
///
/// Every transition goes through `update_with`, so a concurrent terminate
/// wins or loses atomically at the repository and neither writer can
/// overwrite the other's terminal status.
async fn execute(
    pipeline: Arc<QueryPipeline>,
    instances: Arc<dyn InstanceRepository>,
    id: InstanceId,
) -> Result<(), DomainError> {
    let instance = instances
        .update_with(&id, Box::new(|i| i.mark_running().map_err(DomainError::from)))
        .await?;

    let record = pipeline.run(&id, instance.input().clone()).await;

    instances
        .update_with(
            &id,
            Box::new(move |i| i.mark_completed(record).map_err(DomainError::from)),
        )
        .await?;

    Ok(())
}

#[async_trait]
impl WorkflowServiceTrait for WorkflowService {
    async fn schedule(&self, input: QueryInput) -> Result<InstanceId, DomainError> {
        let instance = WorkflowInstance::new(input);
        let id = instance.id().clone();
        self.instances.create(instance).await?;

        info!(instance_id = %id, "Workflow instance scheduled");

        let pipeline = Arc::clone(&self.pipeline);
        let instances = Arc::clone(&self.instances);
        let tasks = Arc::clone(&self.tasks);
        let task_id = id.clone();

        // Held across spawn so the task's cleanup below cannot run before
        // its abort handle is registered.
        let mut tasks_guard = self
            .tasks
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = execute(pipeline, Arc::clone(&instances), task_id.clone()).await {
                warn!(instance_id = %task_id, error = %e, "Instance did not complete");

                let message = e.to_string();
                let _ = instances
                    .update_with(
                        &task_id,
                        Box::new(move |i| {
                            // Terminated while we were failing; leave it be
                            if i.is_terminal() {
                                return Ok(());
                            }
                            i.mark_failed(message).map_err(DomainError::from)
                        }),
                    )
                    .await;
            }

            if let Ok(mut tasks) = tasks.write() {
                tasks.remove(task_id.as_str());
            }
        });

        tasks_guard.insert(id.as_str().to_string(), handle.abort_handle());
        drop(tasks_guard);

        Ok(id)
    }

    async fn status(&self, id: &InstanceId) -> Result<Option<WorkflowInstance>, DomainError> {
        self.instances.get(id).await
    }

    async fn terminate(&self, id: &InstanceId) -> Result<WorkflowInstance, DomainError> {
        // Record the terminal status first; if the pipeline task finished
        // in the meantime the transition fails here and its result stands.
        let terminated = self
            .instances
            .update_with(id, Box::new(|i| i.mark_terminated().map_err(DomainError::from)))
            .await?;

        let handle = {
            let mut tasks = self.tasks.write().map_err(|e| {
                DomainError::internal(format!("Failed to acquire write lock: {}", e))
            })?;
            tasks.remove(id.as_str())
        };

        if let Some(handle) = handle {
            handle.abort();
        }

        info!(instance_id = %id, "Workflow instance terminated");

        Ok(terminated)
    }

    async fn running_count(&self) -> Result<usize, DomainError> {
        Ok(self
            .instances
            .list_by_status(InstanceStatus::Running)
            .await?
            .len())
    }
}
