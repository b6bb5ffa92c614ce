//! In-memory implementation of the instance repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::instance::{
    InstanceId, InstanceRepository, InstanceStatus, InstanceUpdate, WorkflowInstance,
};
use crate::domain::DomainError;

/// In-memory instance repository implementation
#[derive(Debug)]
pub struct InMemoryInstanceRepository {
    instances: RwLock<HashMap<String, WorkflowInstance>>,
}

impl InMemoryInstanceRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryInstanceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InstanceRepository for InMemoryInstanceRepository {
    async fn get(&self, id: &InstanceId) -> Result<Option<WorkflowInstance>, DomainError> {
        let instances = self
            .instances
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(instances.get(id.as_str()).cloned())
    }

    async fn create(&self, instance: WorkflowInstance) -> Result<WorkflowInstance, DomainError> {
        let id = instance.id().as_str().to_string();
        let mut instances = self
            .instances
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        if instances.contains_key(&id) {
            return Err(DomainError::conflict(format!(
                "Instance '{}' already exists",
                id
            )));
        }

        instances.insert(id, instance.clone());
        Ok(instance)
    }

    async fn update_with(
        &self,
        id: &InstanceId,
        update: InstanceUpdate,
    ) -> Result<WorkflowInstance, DomainError> {
        let mut instances = self
            .instances
            .write()
            .map_err(|e| DomainError::internal(format!("Failed to acquire write lock: {}", e)))?;

        let instance = instances
            .get_mut(id.as_str())
            .ok_or_else(|| DomainError::not_found(format!("Instance '{}' not found", id)))?;

        // Mutate a copy so a rejected transition leaves the store untouched
        let mut updated = instance.clone();
        update(&mut updated)?;
        *instance = updated.clone();

        Ok(updated)
    }

    async fn list_by_status(
        &self,
        status: InstanceStatus,
    ) -> Result<Vec<WorkflowInstance>, DomainError> {
        let instances = self
            .instances
            .read()
            .map_err(|e| DomainError::internal(format!("Failed to acquire read lock: {}", e)))?;

        let mut results: Vec<_> = instances
            .values()
            .filter(|i| i.status() == status)
            .cloned()
            .collect();

        results.sort_by(|a, b| a.created_at().cmp(&b.created_at()));

        Ok(results)
    }
}
