//! Sequential pipeline orchestrator
//!
//! Runs validate → generate → audit in strict order for one instance,
//! threading each step's output into the next step's input. Progress is
//! tracked through an explicit state machine; the first step error
//! short-circuits the run and becomes the failure record.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use super::activity::{AuditLogger, CypherGenerator, QueryValidator};
use super::error::PipelineError;
use super::record::{FinalRecord, QueryInput};
use crate::domain::instance::InstanceId;

/// Progress of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Started,
    ValidationDone,
    GenerationDone,
    AuditDone,
    Completed,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Transitions are strictly linear; `Failed` is reachable from any
    /// non-terminal state and `Completed` only from `AuditDone`.
    pub fn can_transition_to(&self, target: PipelineState) -> bool {
        match (self, target) {
            (Self::Started, Self::ValidationDone) => true,
            (Self::ValidationDone, Self::GenerationDone) => true,
            (Self::GenerationDone, Self::AuditDone) => true,
            (Self::AuditDone, Self::Completed) => true,
            (state, Self::Failed) => !state.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::ValidationDone => write!(f, "validation_done"),
            Self::GenerationDone => write!(f, "generation_done"),
            Self::AuditDone => write!(f, "audit_done"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// The three-step pipeline with injected activities
#[derive(Debug, Clone)]
pub struct QueryPipeline {
    validator: Arc<dyn QueryValidator>,
    generator: Arc<dyn CypherGenerator>,
    auditor: Arc<dyn AuditLogger>,
}

impl QueryPipeline {
    pub fn new(
        validator: Arc<dyn QueryValidator>,
        generator: Arc<dyn CypherGenerator>,
        auditor: Arc<dyn AuditLogger>,
    ) -> Self {
        Self {
            validator,
            generator,
            auditor,
        }
    }

    /// Run the pipeline to completion for one instance
    ///
    /// Never returns an error: a step failure is caught and folded into the
    /// failure record, so the caller always gets a `FinalRecord`.
    pub async fn run(&self, instance_id: &InstanceId, input: QueryInput) -> FinalRecord {
        info!(instance_id = %instance_id, query = %input.query, "Starting pipeline");

        match self.run_steps(instance_id, input).await {
            Ok(record) => {
                info!(instance_id = %instance_id, "Pipeline completed");
                record
            }
            Err(e) => {
                error!(
                    instance_id = %instance_id,
                    step = e.step_name(),
                    error = %e,
                    "Pipeline failed"
                );
                FinalRecord::failed(e.to_string())
            }
        }
    }

    async fn run_steps(
        &self,
        instance_id: &InstanceId,
        input: QueryInput,
    ) -> Result<FinalRecord, PipelineError> {
        let mut state = PipelineState::Started;

        let validated = self.validator.validate(&input).await?;
        state = self.advance(instance_id, state, PipelineState::ValidationDone);
        debug!(
            instance_id = %instance_id,
            is_valid = validated.is_valid,
            reason = %validated.validity_check.reason,
            "Validation verdict received"
        );

        let generated = self.generator.generate(validated).await?;
        state = self.advance(instance_id, state, PipelineState::GenerationDone);
        debug!(instance_id = %instance_id, cypher = %generated.cypher_query, "Cypher generated");

        let audited = self.auditor.record(generated).await?;
        state = self.advance(instance_id, state, PipelineState::AuditDone);
        debug!(instance_id = %instance_id, audit_id = %audited.audit_id, "Audit log created");

        self.advance(instance_id, state, PipelineState::Completed);
        Ok(FinalRecord::completed(audited))
    }

    fn advance(
        &self,
        instance_id: &InstanceId,
        from: PipelineState,
        to: PipelineState,
    ) -> PipelineState {
        debug_assert!(from.can_transition_to(to), "invalid transition {from} -> {to}");
        debug!(instance_id = %instance_id, from = %from, to = %to, "Pipeline state transition");
        to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pipeline::activity::mock::{MockAuditLogger, MockGenerator, MockValidator};
    use crate::domain::pipeline::record::ValidityCheck;

    fn pipeline(
        validator: MockValidator,
        generator: MockGenerator,
        auditor: MockAuditLogger,
    ) -> QueryPipeline {
        QueryPipeline::new(Arc::new(validator), Arc::new(generator), Arc::new(auditor))
    }

    fn keanu_input() -> QueryInput {
        QueryInput::new("find movies with Keanu Reeves")
    }

    #[tokio::test]
    async fn test_run_success_threads_all_fields() {
        let pipeline = pipeline(
            MockValidator::valid(),
            MockGenerator::fixed("MATCH (m:Movie) RETURN m.title;"),
            MockAuditLogger::fixed("audit_1700000000000"),
        );

        let record = pipeline
            .run(&InstanceId::generate(), keanu_input())
            .await;

        assert!(record.processed);
        assert!(record.error.is_none());

        let audit = record.audit.expect("audit fields present on success");
        assert_eq!(
            audit.generation.validation.original_query,
            "find movies with Keanu Reeves"
        );
        assert_eq!(audit.generation.cypher_query, "MATCH (m:Movie) RETURN m.title;");
        assert_eq!(audit.audit_id, "audit_1700000000000");
    }

    #[tokio::test]
    async fn test_validation_failure_short_circuits() {
        let pipeline = pipeline(
            MockValidator::valid().with_error("gemini unreachable"),
            MockGenerator::fixed("unused"),
            MockAuditLogger::fixed("unused"),
        );

        let record = pipeline
            .run(&InstanceId::generate(), keanu_input())
            .await;

        assert!(!record.processed);
        assert!(record.audit.is_none());

        // Exact failure shape: {processed: false, error: <message>}
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "processed": false,
                "error": "Validation step failed: gemini unreachable"
            })
        );
    }

    #[tokio::test]
    async fn test_generation_failure_omits_audit_fields() {
        let pipeline = pipeline(
            MockValidator::valid(),
            MockGenerator::fixed("unused").with_error("model rejected the request"),
            MockAuditLogger::fixed("unused"),
        );

        let record = pipeline
            .run(&InstanceId::generate(), keanu_input())
            .await;

        assert!(!record.processed);
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("auditId"));
        assert!(!obj.contains_key("cypherQuery"));
    }

    #[tokio::test]
    async fn test_audit_failure_fails_pipeline() {
        let pipeline = pipeline(
            MockValidator::valid(),
            MockGenerator::fixed("MATCH (m:Movie) RETURN m;"),
            MockAuditLogger::fixed("unused").with_error("audit store unavailable"),
        );

        let record = pipeline
            .run(&InstanceId::generate(), keanu_input())
            .await;

        assert!(!record.processed);
        assert_eq!(
            record.error.as_deref(),
            Some("Audit step failed: audit store unavailable")
        );
    }

    #[tokio::test]
    async fn test_invalid_verdict_still_proceeds() {
        let pipeline = pipeline(
            MockValidator::valid().with_verdict(ValidityCheck {
                is_valid_query: false,
                reason: "Not a data retrieval request".to_string(),
            }),
            MockGenerator::fixed("MATCH (m:Movie) RETURN m;"),
            MockAuditLogger::fixed("audit_1"),
        );

        let record = pipeline
            .run(&InstanceId::generate(), QueryInput::new("hello"))
            .await;

        // The verdict is carried, not acted upon: the run still completes.
        assert!(record.processed);
        let audit = record.audit.unwrap();
        assert!(!audit.generation.validation.is_valid);
        assert!(!audit.generation.validation.validity_check.is_valid_query);
    }

    #[test]
    fn test_state_machine_linear_transitions() {
        use PipelineState::*;

        assert!(Started.can_transition_to(ValidationDone));
        assert!(ValidationDone.can_transition_to(GenerationDone));
        assert!(GenerationDone.can_transition_to(AuditDone));
        assert!(AuditDone.can_transition_to(Completed));

        assert!(!Started.can_transition_to(GenerationDone));
        assert!(!ValidationDone.can_transition_to(Completed));
        assert!(!AuditDone.can_transition_to(ValidationDone));
    }

    #[test]
    fn test_state_machine_failed_reachable_from_non_terminal() {
        use PipelineState::*;

        for state in [Started, ValidationDone, GenerationDone, AuditDone] {
            assert!(state.can_transition_to(Failed), "{state} -> failed");
        }
        assert!(!Completed.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Failed));
    }

    #[test]
    fn test_terminal_states() {
        assert!(PipelineState::Completed.is_terminal());
        assert!(PipelineState::Failed.is_terminal());
        assert!(!PipelineState::Started.is_terminal());
        assert!(!PipelineState::AuditDone.is_terminal());
    }
}
