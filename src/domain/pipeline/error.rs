//! Pipeline step errors

use thiserror::Error;

use crate::domain::DomainError;

/// Error raised by one of the pipeline activities
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Validation step failed: {message}")]
    Validation { message: String },

    #[error("Generation step failed: {message}")]
    Generation { message: String },

    #[error("Audit step failed: {message}")]
    Audit { message: String },
}

impl PipelineError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn audit(message: impl Into<String>) -> Self {
        Self::Audit {
            message: message.into(),
        }
    }

    /// Name of the step the error originated from
    pub fn step_name(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validate_query",
            Self::Generation { .. } => "generate_cypher",
            Self::Audit { .. } => "create_audit_log",
        }
    }
}

impl From<PipelineError> for DomainError {
    fn from(err: PipelineError) -> Self {
        DomainError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names() {
        assert_eq!(
            PipelineError::validation("boom").step_name(),
            "validate_query"
        );
        assert_eq!(
            PipelineError::generation("boom").step_name(),
            "generate_cypher"
        );
        assert_eq!(PipelineError::audit("boom").step_name(), "create_audit_log");
    }

    #[test]
    fn test_display_carries_message() {
        let error = PipelineError::validation("gemini unreachable");
        assert_eq!(
            error.to_string(),
            "Validation step failed: gemini unreachable"
        );
    }
}
