//! Anthropic Messages API backend.

use crate::backend::{LlmBackend, LlmConfig, LlmError, LlmResult};
use crate::http::Endpoint;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: [UserTurn<'a>; 1],
}

#[derive(Serialize)]
struct UserTurn<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Anthropic's 400 for oversized prompts mentions the token limit.
fn is_context_error(body: &str) -> bool {
    body.contains("invalid_request_error") && body.contains("token")
}

/// Claude over the Anthropic Messages API.
///
/// ```rust,ignore
/// let backend = ClaudeBackend::new(&api_key)?.with_model("claude-3-5-haiku-20241022");
/// let report = backend.complete("Uses of Vernonia amygdalina?").await?;
/// ```
pub struct ClaudeBackend {
    api_key: String,
    config: LlmConfig,
    endpoint: Endpoint,
}

impl ClaudeBackend {
    pub fn new(api_key: &str) -> LlmResult<Self> {
        Self::with_config(api_key, LlmConfig::claude())
    }

    pub fn with_config(api_key: &str, config: LlmConfig) -> LlmResult<Self> {
        Ok(Self {
            api_key: api_key.to_string(),
            endpoint: Endpoint::new("claude", MESSAGES_URL, config.timeout_secs)?,
            config,
        })
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.config.model = model.to_string();
        self
    }

    /// Point at a gateway or local stand-in instead of api.anthropic.com.
    pub fn with_endpoint(mut self, url: &str) -> Self {
        self.endpoint.url = url.to_string();
        self
    }
}

#[async_trait]
impl LlmBackend for ClaudeBackend {
    fn name(&self) -> &str {
        "claude"
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn complete_with_system(&self, system: Option<&str>, prompt: &str) -> LlmResult<String> {
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system,
            messages: [UserTurn {
                role: "user",
                content: prompt,
            }],
        };
        let headers = [
            ("x-api-key", self.api_key.clone()),
            ("anthropic-version", API_VERSION.to_string()),
        ];

        tracing::debug!(model = %self.config.model, chars = prompt.len(), "claude request");
        let response: MessagesResponse = self
            .endpoint
            .post(&headers, &body, &self.config.model, is_context_error)
            .await?;

        response
            .content
            .into_iter()
            .map(|block| block.text)
            .find(|text| !text.is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("claude returned no text block".to_string()))
    }
}
