//! Validation activity backed by the generative-AI provider

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use crate::domain::pipeline::{PipelineError, QueryInput, ValidationRecord, ValidityCheck};
use crate::domain::{GenerateRequest, LlmProvider, QueryValidator};

/// The fixed structured-output contract for the validation call
fn validity_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Query Validator Output",
        "description": "Boolean gatekeeper verdict on whether a user question is a valid request for data retrieval.",
        "type": "object",
        "properties": {
            "is_valid_query": {
                "description": "True if the user's question is a valid request for data retrieval, false otherwise.",
                "type": "boolean"
            },
            "reason": {
                "description": "Brief explanation of why the query is valid or invalid.",
                "type": "string"
            }
        },
        "required": ["is_valid_query", "reason"],
        "additionalProperties": false
    })
}

/// Validates queries by asking the model for a schema-constrained verdict
#[derive(Debug)]
pub struct LlmQueryValidator {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl LlmQueryValidator {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }
}

#[async_trait]
impl QueryValidator for LlmQueryValidator {
    async fn validate(&self, input: &QueryInput) -> Result<ValidationRecord, PipelineError> {
        debug!(query = %input.query, "Requesting validity verdict");

        let request = GenerateRequest::builder()
            .prompt(&input.query)
            .json_schema(validity_schema())
            .build();

        let response = self
            .provider
            .generate(&self.model, request)
            .await
            .map_err(|e| PipelineError::validation(e.to_string()))?;

        let validity_check: ValidityCheck = serde_json::from_str(&response.text).map_err(|e| {
            PipelineError::validation(format!(
                "Verdict did not match the response schema: {}",
                e
            ))
        })?;

        Ok(ValidationRecord {
            original_query: input.query.clone(),
            is_valid: validity_check.is_valid_query,
            validity_check,
            validated_at: Utc::now(),
        })
    }
}
