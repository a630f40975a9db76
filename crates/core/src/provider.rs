//! Model provider abstraction.
//!
//! A provider turns a request into a completion. Implementations live in
//! `paperhound-providers`; this crate only defines the contract so the agent
//! can be tested against scripted mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;
use crate::message::Message;

/// A plain chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Tool definitions offered to the model, in provider wire format.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Value>,
    /// Per-request timeout. Explicit here so callers never inherit an
    /// unbounded HTTP client default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ProviderRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
            tools: Vec::new(),
            timeout_secs: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// A request whose answer must conform to a JSON schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub schema_name: String,
    pub schema: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl StructuredRequest {
    pub fn new(
        model: impl Into<String>,
        messages: Vec<Message>,
        schema_name: impl Into<String>,
        schema: Value,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
            schema_name: schema_name.into(),
            schema,
            timeout_secs: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A completion from the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub message: Message,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    pub model: String,
}

/// Trait implemented by model backends.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider identifier used in logs.
    fn name(&self) -> &str;

    /// Run a chat completion, possibly offering tools.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError>;

    /// Run a completion constrained to a JSON schema and return the parsed
    /// JSON value. Output that does not parse as JSON is a
    /// [`ProviderError::MalformedOutput`].
    async fn complete_structured(
        &self,
        request: StructuredRequest,
    ) -> Result<Value, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_chains() {
        let req = ProviderRequest::new("test-model", vec![Message::user("hi")])
            .with_temperature(0.1)
            .with_max_tokens(512)
            .with_timeout_secs(30);
        assert_eq!(req.model, "test-model");
        assert_eq!(req.temperature, Some(0.1));
        assert_eq!(req.max_tokens, Some(512));
        assert_eq!(req.timeout_secs, Some(30));
    }

    #[test]
    fn structured_request_carries_schema() {
        let schema = serde_json::json!({"type": "object"});
        let req = StructuredRequest::new("m", vec![], "intent", schema.clone());
        assert_eq!(req.schema_name, "intent");
        assert_eq!(req.schema, schema);
    }
}
