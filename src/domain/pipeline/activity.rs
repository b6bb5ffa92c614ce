//! Activity traits for the pipeline steps
//!
//! Each step is a stateless unit of work behind a trait, so the orchestrator
//! takes injected implementations and tests can swap in mocks.

use async_trait::async_trait;
use std::fmt::Debug;

use super::error::PipelineError;
use super::record::{AuditRecord, GenerationRecord, QueryInput, ValidationRecord};

/// Validates the incoming user query against the AI service
#[async_trait]
pub trait QueryValidator: Send + Sync + Debug {
    async fn validate(&self, input: &QueryInput) -> Result<ValidationRecord, PipelineError>;
}

/// Produces a Cypher query from a validated input
#[async_trait]
pub trait CypherGenerator: Send + Sync + Debug {
    async fn generate(&self, input: ValidationRecord) -> Result<GenerationRecord, PipelineError>;
}

/// Records an audit trail entry for the generated query
#[async_trait]
pub trait AuditLogger: Send + Sync + Debug {
    async fn record(&self, input: GenerationRecord) -> Result<AuditRecord, PipelineError>;
}
