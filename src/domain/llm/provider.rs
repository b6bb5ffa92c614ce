use async_trait::async_trait;
use std::fmt::Debug;

use super::{GenerateRequest, GenerateResponse};
use crate::domain::DomainError;

/// Trait for generative-AI providers (Gemini, etc.)
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a single content-generation request
    async fn generate(
        &self,
        model: &str,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    #[derive(Debug)]
    pub struct MockLlmProvider {
        name: &'static str,
        response: Option<GenerateResponse>,
        error: Option<String>,
    }

    impl MockLlmProvider {
        pub fn new(name: &'static str) -> Self {
            Self {
                name,
                response: None,
                error: None,
            }
        }

        pub fn with_text(mut self, text: impl Into<String>) -> Self {
            self.response = Some(GenerateResponse::new(text));
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn generate(
            &self,
            _model: &str,
            _request: GenerateRequest,
        ) -> Result<GenerateResponse, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error.clone()));
            }

            self.response
                .clone()
                .ok_or_else(|| DomainError::provider(self.name, "No mock response configured"))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }
    }
}
