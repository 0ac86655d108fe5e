//! Core LLM backend trait.

use crate::prompt::{parse_local_name_json, NameLookupPrompt, PromptTemplate, SynthesisPrompt};
use async_trait::async_trait;
use ewe_core::config::LlmSettings;
use ewe_core::types::LocalNameRecord;
use std::sync::Mutex;
use thiserror::Error;

/// Failures of a completion call, classified by what the caller can do
/// about them.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u32),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Parsing failed: {0}")]
    ParseError(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Prompt exceeds the model's context window")]
    ContextTooLong,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Timeout after {0} seconds")]
    Timeout(u32),
}

pub type LlmResult<T> = Result<T, LlmError>;

/// Model choice and sampling parameters for one backend.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model: String,
    pub max_tokens: u32,
    /// Clamped to `[0, 2]`. Research answers run at 0.2.
    pub temperature: f32,
    pub timeout_secs: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "default".to_string(),
            max_tokens: 2048,
            temperature: 0.2,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    pub fn claude() -> Self {
        Self::default().with_model("claude-3-5-sonnet-20241022")
    }

    pub fn openai() -> Self {
        Self::default().with_model("gpt-4o-mini")
    }

    /// Overlay sampling parameters and the optional model override.
    pub fn apply_settings(self, settings: &LlmSettings) -> Self {
        let config = match &settings.model {
            Some(model) => self.with_model(model.as_str()),
            None => self,
        };
        config
            .with_max_tokens(settings.max_tokens)
            .with_temperature(settings.temperature)
            .with_timeout(settings.timeout_secs)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u32) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// A hosted text-completion capability.
///
/// Providers implement [`LlmBackend::complete_with_system`]; synthesis and
/// name lookup are built on it.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Short provider label used in logs.
    fn name(&self) -> &str;

    fn config(&self) -> &LlmConfig;

    /// One completion for an optional system prompt plus a user prompt.
    async fn complete_with_system(&self, system: Option<&str>, prompt: &str) -> LlmResult<String>;

    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        self.complete_with_system(None, prompt).await
    }

    /// Run the research synthesis prompt; the model's text is returned as-is.
    async fn synthesize(&self, prompt: &SynthesisPrompt<'_>) -> LlmResult<String> {
        let system = prompt.system_prompt();
        self.complete_with_system(system.as_deref(), &prompt.generate())
            .await
    }

    /// Ask for localized names of one scientific plant name.
    async fn lookup_local_names(&self, scientific_name: &str) -> LlmResult<LocalNameRecord> {
        let prompt = NameLookupPrompt::new(scientific_name);
        let system = prompt.system_prompt();
        let response = self
            .complete_with_system(system.as_deref(), &prompt.generate())
            .await?;

        parse_local_name_json(&response, scientific_name).map_err(|e| {
            LlmError::ParseError(format!("Failed to parse local names: {}. Response: {}", e, response))
        })
    }
}

/// A mock backend for testing.
///
/// Responses are chosen by substring match against the user prompt; prompts
/// are recorded in call order.
pub struct MockBackend {
    config: LlmConfig,
    responses: Vec<(String, String)>,
    failures: Vec<String>,
    default_response: String,
    prompts: Mutex<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            config: LlmConfig::default(),
            responses: Vec::new(),
            failures: Vec::new(),
            default_response: "Mock response".to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Add a canned response for a prompt pattern. Earlier patterns win.
    pub fn with_response(mut self, pattern: &str, response: &str) -> Self {
        self.responses.push((pattern.to_string(), response.to_string()));
        self
    }

    /// Fail any prompt containing `pattern`.
    pub fn with_failure(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }

    /// Response used when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = response.to_string();
        self
    }

    /// User prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    async fn complete_with_system(&self, _system: Option<&str>, prompt: &str) -> LlmResult<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if self.failures.iter().any(|p| prompt.contains(p.as_str())) {
            return Err(LlmError::ConnectionFailed("mock failure".to_string()));
        }

        for (pattern, response) in &self.responses {
            if prompt.contains(pattern.as_str()) {
                return Ok(response.clone());
            }
        }
        Ok(self.default_response.clone())
    }
}
