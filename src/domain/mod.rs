//! Domain types and traits
//!
//! Pure business types with no I/O: pipeline records and orchestration,
//! workflow-instance lifecycle, and the LLM provider seam.

pub mod error;
pub mod instance;
pub mod llm;
pub mod pipeline;

pub use error::DomainError;
pub use instance::{InstanceId, InstanceRepository, InstanceStatus, WorkflowInstance};
pub use llm::{GenerateRequest, GenerateResponse, LlmProvider, Usage};
pub use pipeline::{
    AuditLogger, AuditRecord, AuditStatus, CypherGenerator, FinalRecord, GenerationRecord,
    PipelineError, PipelineState, QueryInput, QueryPipeline, QueryValidator, ValidationRecord,
    ValidityCheck,
};
