//! The three-step query pipeline: validate, generate, audit.

pub mod activity;
pub mod error;
pub mod orchestrator;
pub mod record;

pub use activity::{AuditLogger, CypherGenerator, QueryValidator};
pub use error::PipelineError;
pub use orchestrator::{PipelineState, QueryPipeline};
pub use record::{
    AuditRecord, AuditStatus, FinalRecord, GenerationRecord, QueryInput, ValidationRecord,
    ValidityCheck,
};
