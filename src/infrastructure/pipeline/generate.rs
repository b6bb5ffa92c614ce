//! Generation activity
//!
//! Placeholder implementation: always returns one fixed Cypher query.
//! TODO: replace with a model-backed generator that builds the query from
//! `input.original_query` and fails on malformed or unsafe output.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::pipeline::{GenerationRecord, PipelineError, ValidationRecord};
use crate::domain::CypherGenerator;

const PLACEHOLDER_CYPHER: &str =
    r#"MATCH (p:Person {name: "Keanu Reeves"})-[:ACTED_IN]->(m:Movie) RETURN m.title;"#;

/// Deterministic stand-in for a real Cypher generator
#[derive(Debug, Default)]
pub struct StaticCypherGenerator;

impl StaticCypherGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CypherGenerator for StaticCypherGenerator {
    async fn generate(&self, input: ValidationRecord) -> Result<GenerationRecord, PipelineError> {
        debug!(original_query = %input.original_query, "Generating Cypher (placeholder)");

        Ok(GenerationRecord {
            validation: input,
            cypher_query: PLACEHOLDER_CYPHER.to_string(),
            generated_at: Utc::now(),
        })
    }
}
