//! Generative-AI provider abstraction

pub mod provider;
pub mod request;
pub mod response;

pub use provider::LlmProvider;
pub use request::GenerateRequest;
pub use response::{GenerateResponse, Usage};
