//! Instance repository trait
//!
//! The seam where a durable store would plug in; the local runtime uses the
//! in-memory implementation from `infrastructure::instance`.

use async_trait::async_trait;

use super::entity::{InstanceId, InstanceStatus, WorkflowInstance};
use crate::domain::DomainError;

/// Mutation applied to a stored instance while the repository holds its lock
pub type InstanceUpdate =
    Box<dyn FnOnce(&mut WorkflowInstance) -> Result<(), DomainError> + Send>;

/// Repository for workflow instance state
#[async_trait]
pub trait InstanceRepository: Send + Sync + std::fmt::Debug {
    /// Get an instance by ID
    async fn get(&self, id: &InstanceId) -> Result<Option<WorkflowInstance>, DomainError>;

    /// Persist a newly scheduled instance
    async fn create(&self, instance: WorkflowInstance) -> Result<WorkflowInstance, DomainError>;

    /// Apply a state change to the stored instance and return the result
    ///
    /// The mutation runs against the stored copy under the repository's
    /// write lock, so a writer holding a stale snapshot cannot overwrite a
    /// concurrent transition. A failed mutation leaves the stored instance
    /// untouched.
    async fn update_with(
        &self,
        id: &InstanceId,
        update: InstanceUpdate,
    ) -> Result<WorkflowInstance, DomainError>;

    /// List instances in the given status
    async fn list_by_status(
        &self,
        status: InstanceStatus,
    ) -> Result<Vec<WorkflowInstance>, DomainError>;
}
