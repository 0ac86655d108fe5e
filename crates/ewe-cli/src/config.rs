//! Settings loading and pipeline assembly for the CLI.

use anyhow::{Context, Result};
use ewe::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Load settings from `path`, or discover ewe.toml; environment overrides apply
/// either way.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            let mut settings = Settings::from_file(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            settings.apply_env(|key| std::env::var(key).ok())?;
            Ok(settings)
        }
        None => Settings::load().context("Failed to load settings"),
    }
}

/// Literature source: NCBI directly, or the ewe-web relay.
pub fn literature_source(settings: &Settings, proxy: bool) -> Result<Arc<dyn LiteratureSource>> {
    let source: Arc<dyn LiteratureSource> = if proxy {
        Arc::new(
            ProxyClient::from_settings(&settings.literature)
                .context("Failed to build relay client")?,
        )
    } else {
        Arc::new(
            EutilsClient::from_settings(&settings.literature)
                .context("Failed to build E-utilities client")?,
        )
    };
    Ok(source)
}

/// Assemble the research pipeline. Fails when no LLM API key is configured.
pub fn build_pipeline(settings: &Settings, proxy: bool) -> Result<ResearchPipeline> {
    let backend = backend_from_settings(&settings.llm).with_context(|| {
        let var = match settings.llm.provider {
            LlmProvider::Claude => "ANTHROPIC_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
        };
        format!("No usable LLM backend. Set {} or edit ewe.toml", var)
    })?;

    Ok(ResearchPipeline::with_config(
        literature_source(settings, proxy)?,
        Arc::new(HerbalStore::builtin()),
        backend,
        PipelineConfig::from_settings(settings),
    ))
}
