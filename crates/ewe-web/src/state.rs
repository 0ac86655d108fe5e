//! Application state for the web server.
//!
//! Everything is read-only after startup and shared through `Arc`s, so the
//! state is cheap to clone into each handler.

use anyhow::{Context, Result};
use ewe_core::config::Settings;
use ewe_core::error::EweError;
use ewe_literature::{EutilsClient, ProgressFn};
use ewe_llm::backend_from_settings;
use ewe_rag::{HerbalStore, PipelineConfig, ResearchOutcome, ResearchPipeline};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    eutils: Arc<EutilsClient>,
    /// `None` when no LLM API key is configured; the proxy still works.
    pipeline: Option<Arc<ResearchPipeline>>,
}

impl AppState {
    pub fn new(eutils: Arc<EutilsClient>, pipeline: Option<Arc<ResearchPipeline>>) -> Self {
        Self { eutils, pipeline }
    }

    /// Build the E-utilities client, herbal table and (if configured) the LLM
    /// backend from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let eutils = Arc::new(
            EutilsClient::from_settings(&settings.literature)
                .context("failed to build E-utilities client")?,
        );

        let pipeline = match backend_from_settings(&settings.llm) {
            Ok(backend) => Some(Arc::new(ResearchPipeline::with_config(
                eutils.clone(),
                Arc::new(HerbalStore::builtin()),
                backend,
                PipelineConfig::from_settings(settings),
            ))),
            Err(e) => {
                tracing::warn!(error = %e, "research endpoints disabled; only the PubMed proxy is available");
                None
            }
        };

        Ok(Self::new(eutils, pipeline))
    }

    pub fn eutils(&self) -> &EutilsClient {
        &self.eutils
    }

    /// Name of the configured LLM backend, if any.
    pub fn backend_name(&self) -> Option<&str> {
        self.pipeline.as_deref().map(|p| p.backend().name())
    }

    /// Run one research query.
    pub async fn research(
        &self,
        query: &str,
        progress: ProgressFn<'_>,
    ) -> ewe_core::error::Result<ResearchOutcome> {
        let pipeline = self
            .pipeline
            .as_ref()
            .ok_or_else(|| EweError::missing_config("llm api key"))?;
        pipeline.run(query, progress).await
    }
}
