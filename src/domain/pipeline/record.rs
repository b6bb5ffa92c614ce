//! Typed records threaded through the pipeline
//!
//! Each step's output embeds its input via `#[serde(flatten)]`, so the wire
//! form of a later record is a strict superset of the earlier one and a
//! field-name collision fails loudly instead of silently overwriting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Initial payload submitted by the HTTP caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInput {
    /// Free-form natural-language query text
    pub query: String,
}

impl QueryInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

/// Verdict returned by the AI service, per the fixed response schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityCheck {
    /// True if the question is a valid request for data retrieval
    pub is_valid_query: bool,

    /// Brief explanation of why the query is valid or invalid
    pub reason: String,
}

/// Output of the validation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRecord {
    /// The query text as originally submitted
    pub original_query: String,

    /// Parsed verdict from the AI service
    pub validity_check: ValidityCheck,

    /// Mirrors the parsed `is_valid_query` verdict
    pub is_valid: bool,

    /// When validation finished
    pub validated_at: DateTime<Utc>,
}

/// Output of the generation step: validation fields plus the Cypher query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    #[serde(flatten)]
    pub validation: ValidationRecord,

    /// The generated Cypher query
    pub cypher_query: String,

    /// When generation finished
    pub generated_at: DateTime<Utc>,
}

/// Status marker appended by the audit step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Success,
}

/// Output of the audit step: generation fields plus the audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    #[serde(flatten)]
    pub generation: GenerationRecord,

    /// Timestamp-based audit identifier (`audit_<unix-millis>`)
    pub audit_id: String,

    /// When the audit entry was created
    pub audited_at: DateTime<Utc>,

    /// Fixed success marker
    pub status: AuditStatus,
}

/// Final result of one pipeline instance
///
/// Success carries every field contributed by the three steps; failure is
/// exactly `{"processed": false, "error": <message>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalRecord {
    /// Whether the pipeline ran to completion
    pub processed: bool,

    /// Audit output on success
    #[serde(flatten)]
    pub audit: Option<AuditRecord>,

    /// Error message on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FinalRecord {
    /// Build the success record from the audit step's output
    pub fn completed(audit: AuditRecord) -> Self {
        Self {
            processed: true,
            audit: Some(audit),
            error: None,
        }
    }

    /// Build the failure record from a step error message
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            processed: false,
            audit: None,
            error: Some(error.into()),
        }
    }
}
