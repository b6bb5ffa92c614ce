//! Workflow instance entity
//!
//! One instance is one scheduled execution of the pipeline, addressed by an
//! opaque `wf-<uuid>` identifier. The runtime owns its status lifecycle.

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::domain::pipeline::{FinalRecord, QueryInput};
use crate::domain::DomainError;

/// Regex pattern for valid instance IDs: wf-{uuid}
static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^wf-[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$").unwrap()
});

/// Maximum length for instance IDs
pub const MAX_ID_LENGTH: usize = 39; // "wf-" + 36 char UUID

/// Errors from instance lifecycle operations
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("Invalid instance ID: {message}")]
    InvalidId { message: String },

    #[error("Invalid status transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },
}

impl InstanceError {
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn invalid_transition(from: InstanceStatus, to: InstanceStatus) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl From<InstanceError> for DomainError {
    fn from(err: InstanceError) -> Self {
        match err {
            InstanceError::InvalidId { message } => DomainError::invalid_id(message),
            InstanceError::InvalidTransition { .. } => DomainError::conflict(err.to_string()),
        }
    }
}

/// Validated workflow instance identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct InstanceId(String);

impl InstanceId {
    /// Create a validated instance ID from an existing string
    pub fn new(id: impl Into<String>) -> Result<Self, InstanceError> {
        let id = id.into();
        validate_instance_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh instance ID
    pub fn generate() -> Self {
        Self(format!("wf-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<InstanceId> for String {
    fn from(id: InstanceId) -> Self {
        id.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for InstanceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validate an instance ID string
pub fn validate_instance_id(id: &str) -> Result<(), InstanceError> {
    if id.is_empty() {
        return Err(InstanceError::invalid_id("Instance ID cannot be empty"));
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(InstanceError::invalid_id(format!(
            "Instance ID exceeds maximum length of {} characters",
            MAX_ID_LENGTH
        )));
    }

    if !ID_PATTERN.is_match(id) {
        return Err(InstanceError::invalid_id(format!(
            "Invalid instance ID '{}': must be in format wf-{{uuid}}",
            id
        )));
    }

    Ok(())
}

/// Runtime status of a workflow instance
///
/// Serialized in upper-case runtime-status form (`RUNNING`, `COMPLETED`)
/// since the status endpoint exposes it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceStatus {
    /// Scheduled but not yet started
    #[default]
    Pending,

    /// Pipeline is executing
    Running,

    /// Pipeline produced a final record (success or caught failure)
    Completed,

    /// The runtime could not execute or record the instance
    Failed,

    /// Cancelled on request
    Terminated,
}

impl InstanceStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Terminated)
    }

    pub fn can_transition_to(&self, target: InstanceStatus) -> bool {
        match (self, target) {
            (Self::Pending, Self::Running) => true,
            (Self::Pending, Self::Terminated) => true,
            (Self::Running, Self::Completed) => true,
            (Self::Running, Self::Failed) => true,
            (Self::Running, Self::Terminated) => true,
            _ => false,
        }
    }
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Running => write!(f, "RUNNING"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Terminated => write!(f, "TERMINATED"),
        }
    }
}

/// One scheduled execution of the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowInstance {
    /// Unique instance identifier
    id: InstanceId,

    /// The input the instance was scheduled with
    input: QueryInput,

    /// Current runtime status
    status: InstanceStatus,

    /// Final record once the pipeline has run
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<FinalRecord>,

    /// Runtime-level error message (if the instance failed to execute)
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,

    /// When the instance was scheduled
    created_at: DateTime<Utc>,

    /// When the pipeline started running
    #[serde(skip_serializing_if = "Option::is_none")]
    started_at: Option<DateTime<Utc>>,

    /// When the instance reached a terminal status
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

impl WorkflowInstance {
    /// Create a new pending instance with a fresh ID
    pub fn new(input: QueryInput) -> Self {
        Self {
            id: InstanceId::generate(),
            input,
            status: InstanceStatus::Pending,
            output: None,
            error: None,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    // Getters

    pub fn id(&self) -> &InstanceId {
        &self.id
    }

    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    pub fn status(&self) -> InstanceStatus {
        self.status
    }

    pub fn output(&self) -> Option<&FinalRecord> {
        self.output.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Mark the instance as running
    pub fn mark_running(&mut self) -> Result<(), InstanceError> {
        self.transition(InstanceStatus::Running)?;
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Mark the instance as completed with the pipeline's final record
    pub fn mark_completed(&mut self, output: FinalRecord) -> Result<(), InstanceError> {
        self.transition(InstanceStatus::Completed)?;
        self.output = Some(output);
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Mark the instance as failed at the runtime level
    pub fn mark_failed(&mut self, error: impl Into<String>) -> Result<(), InstanceError> {
        self.transition(InstanceStatus::Failed)?;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    /// Mark the instance as terminated on request
    pub fn mark_terminated(&mut self) -> Result<(), InstanceError> {
        self.transition(InstanceStatus::Terminated)?;
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    fn transition(&mut self, target: InstanceStatus) -> Result<(), InstanceError> {
        if !self.status.can_transition_to(target) {
            return Err(InstanceError::invalid_transition(self.status, target));
        }
        self.status = target;
        Ok(())
    }
}
