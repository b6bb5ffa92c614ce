//! Concrete pipeline activities

pub mod audit;
pub mod generate;
pub mod validate;

pub use audit::TimestampAuditLogger;
pub use generate::StaticCypherGenerator;
pub use validate::LlmQueryValidator;
