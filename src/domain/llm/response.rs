//! Content-generation response

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Response from a generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    /// Concatenated text of the model's reply
    pub text: String,

    /// Token usage, when the provider reports it
    pub usage: Option<Usage>,
}

impl GenerateResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }
}
