//! Audit activity
//!
//! Mints a timestamp-based identifier and appends the success marker.
//! TODO: persist the audit trail to a real store once one is chosen.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::domain::pipeline::{AuditRecord, AuditStatus, GenerationRecord, PipelineError};
use crate::domain::AuditLogger;

/// Audit logger that derives ids from the current time
#[derive(Debug, Default)]
pub struct TimestampAuditLogger;

impl TimestampAuditLogger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditLogger for TimestampAuditLogger {
    async fn record(&self, input: GenerationRecord) -> Result<AuditRecord, PipelineError> {
        let audit_id = format!("audit_{}", Utc::now().timestamp_millis());
        debug!(audit_id = %audit_id, "Audit log created");

        Ok(AuditRecord {
            generation: input,
            audit_id,
            audited_at: Utc::now(),
            status: AuditStatus::Success,
        })
    }
}
