//! Backend selection from configuration.

use crate::backend::{LlmBackend, LlmConfig, LlmError, LlmResult};
use crate::claude::ClaudeBackend;
use crate::openai::OpenAiBackend;
use ewe_core::config::{LlmProvider, LlmSettings};
use std::sync::Arc;

/// Build the configured provider. Fails when its API key is absent.
pub fn backend_from_settings(settings: &LlmSettings) -> LlmResult<Arc<dyn LlmBackend>> {
    let api_key = settings.api_key().map_err(|e| {
        tracing::error!(provider = ?settings.provider, error = %e, "no API key for LLM provider");
        LlmError::AuthenticationFailed
    })?;

    let backend: Arc<dyn LlmBackend> = match settings.provider {
        LlmProvider::Claude => Arc::new(ClaudeBackend::with_config(
            api_key,
            LlmConfig::claude().apply_settings(settings),
        )?),
        LlmProvider::OpenAi => Arc::new(OpenAiBackend::with_config(
            api_key,
            LlmConfig::openai().apply_settings(settings),
        )?),
    };

    tracing::info!(backend = backend.name(), model = %backend.config().model, "LLM backend ready");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_configured_provider() {
        let mut settings = LlmSettings::default();
        settings.provider = LlmProvider::OpenAi;
        settings.openai_api_key = Some("sk-test".into());

        let backend = backend_from_settings(&settings).unwrap();
        assert_eq!(backend.name(), "openai");

        settings.provider = LlmProvider::Claude;
        settings.anthropic_api_key = Some("sk-ant-test".into());
        settings.model = Some("claude-3-5-haiku-20241022".into());
        let backend = backend_from_settings(&settings).unwrap();
        assert_eq!(backend.name(), "claude");
        assert!(backend.config().model.contains("haiku"));
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let settings = LlmSettings::default();
        assert!(matches!(
            backend_from_settings(&settings),
            Err(LlmError::AuthenticationFailed)
        ));
    }
}
