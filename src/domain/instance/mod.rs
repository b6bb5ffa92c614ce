//! Workflow instance lifecycle

pub mod entity;
pub mod repository;

pub use entity::{InstanceError, InstanceId, InstanceStatus, WorkflowInstance};
pub use repository::{InstanceRepository, InstanceUpdate};
