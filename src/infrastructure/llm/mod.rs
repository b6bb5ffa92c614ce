//! LLM provider implementations

pub mod gemini;
pub mod http_client;

pub use gemini::GeminiProvider;
pub use http_client::{HttpClient, HttpClientTrait};
