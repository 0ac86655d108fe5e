//! OpenAI Chat Completions backend.

use crate::backend::{LlmBackend, LlmConfig, LlmError, LlmResult};
use crate::http::Endpoint;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

fn is_context_error(body: &str) -> bool {
    body.contains("maximum context length") || body.contains("context_length_exceeded")
}

/// GPT models over the Chat Completions API. Any compatible endpoint works
/// through [`OpenAiBackend::with_endpoint`].
pub struct OpenAiBackend {
    api_key: String,
    config: LlmConfig,
    endpoint: Endpoint,
}

impl OpenAiBackend {
    pub fn new(api_key: &str) -> LlmResult<Self> {
        Self::with_config(api_key, LlmConfig::openai())
    }

    pub fn with_config(api_key: &str, config: LlmConfig) -> LlmResult<Self> {
        Ok(Self {
            api_key: api_key.to_string(),
            endpoint: Endpoint::new("openai", CHAT_URL, config.timeout_secs)?,
            config,
        })
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.config.model = model.to_string();
        self
    }

    pub fn with_endpoint(mut self, url: &str) -> Self {
        self.endpoint.url = url.to_string();
        self
    }
}

fn chat_messages<'a>(system: Option<&'a str>, prompt: &'a str) -> Vec<ChatMessage<'a>> {
    system
        .map(|content| ChatMessage { role: "system", content })
        .into_iter()
        .chain(std::iter::once(ChatMessage { role: "user", content: prompt }))
        .collect()
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    fn name(&self) -> &str {
        "openai"
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn complete_with_system(&self, system: Option<&str>, prompt: &str) -> LlmResult<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: chat_messages(system, prompt),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        let headers = [("authorization", format!("Bearer {}", self.api_key))];

        tracing::debug!(model = %self.config.model, chars = prompt.len(), "openai request");
        let response: ChatResponse = self
            .endpoint
            .post(&headers, &body, &self.config.model, is_context_error)
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("openai returned no choices".to_string()))
    }
}
