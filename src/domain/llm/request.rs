//! Content-generation request

use serde_json::Value;

/// A single-turn generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Prompt text sent to the model
    pub prompt: String,

    /// Requested response MIME type (e.g. `application/json`)
    pub response_mime_type: Option<String>,

    /// JSON Schema the response must conform to
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Builder for [`GenerateRequest`]
#[derive(Debug, Default)]
pub struct GenerateRequestBuilder {
    prompt: String,
    response_mime_type: Option<String>,
    response_schema: Option<Value>,
}

impl GenerateRequestBuilder {
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Require a JSON response conforming to the given schema
    pub fn json_schema(mut self, schema: Value) -> Self {
        self.response_mime_type = Some("application/json".to_string());
        self.response_schema = Some(schema);
        self
    }

    pub fn build(self) -> GenerateRequest {
        GenerateRequest {
            prompt: self.prompt,
            response_mime_type: self.response_mime_type,
            response_schema: self.response_schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_plain_prompt() {
        let request = GenerateRequest::builder().prompt("hello").build();
        assert_eq!(request.prompt, "hello");
        assert!(request.response_mime_type.is_none());
        assert!(request.response_schema.is_none());
    }

    #[test]
    fn test_builder_json_schema_sets_mime_type() {
        let schema = json!({"type": "object"});
        let request = GenerateRequest::builder()
            .prompt("validate this")
            .json_schema(schema.clone())
            .build();

        assert_eq!(
            request.response_mime_type.as_deref(),
            Some("application/json")
        );
        assert_eq!(request.response_schema, Some(schema));
    }
}
