//! Cypherflow - query-validation and Cypher-generation workflow service
//!
//! A three-step sequential pipeline (validate the user's question against
//! Gemini, generate a Cypher query, write an audit entry) behind an HTTP
//! control surface for starting, inspecting, and terminating workflow
//! instances.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::pipeline::QueryPipeline;
use domain::LlmProvider;
use infrastructure::instance::InMemoryInstanceRepository;
use infrastructure::llm::{GeminiProvider, HttpClient};
use infrastructure::pipeline::{LlmQueryValidator, StaticCypherGenerator, TimestampAuditLogger};
use infrastructure::runtime::WorkflowService;
use tracing::warn;

/// Create the application state with all services initialized
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    if config.gemini.api_key.is_empty() {
        warn!("GEMINI_API_KEY is not set; query validation calls will fail");
    }

    let http_client = HttpClient::new();
    let provider: Arc<dyn LlmProvider> = match config.gemini.base_url {
        Some(ref base_url) => Arc::new(GeminiProvider::with_base_url(
            http_client,
            config.gemini.api_key.as_str(),
            base_url.as_str(),
        )),
        None => Arc::new(GeminiProvider::new(
            http_client,
            config.gemini.api_key.as_str(),
        )),
    };

    let pipeline = QueryPipeline::new(
        Arc::new(LlmQueryValidator::new(
            Arc::clone(&provider),
            config.gemini.model.as_str(),
        )),
        Arc::new(StaticCypherGenerator::new()),
        Arc::new(TimestampAuditLogger::new()),
    );

    let instances = Arc::new(InMemoryInstanceRepository::new());
    let workflow_service = Arc::new(WorkflowService::new(Arc::new(pipeline), instances));

    Ok(AppState::new(workflow_service))
}
