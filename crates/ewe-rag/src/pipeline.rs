//! End-to-end research pipeline.
//!
//! One sequential run per query:
//! tiered search → fetch → parse → (plant names + herbal excerpts) →
//! name enrichment → prompt → synthesis.
//!
//! Upstream failures degrade (no articles, placeholder names, fixed synthesis
//! message). The only error a run returns is a blank query.

use crate::extract::extract_plant_names;
use crate::herbal::{HerbalStore, ScoredExcerpt};
use ewe_core::config::{EnrichmentSettings, Settings};
use ewe_core::error::{EweError, Result};
use ewe_core::types::{ArticleRecord, EnrichmentTable, HerbalExcerpt};
use ewe_literature::{LiteratureSource, ProgressFn, QueryPlanner, SearchTier, TierAttempt};
use ewe_llm::{synthesize_report, LlmBackend, NameEnricher, SynthesisPrompt};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Pipeline tuning.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Herbal excerpts handed to the prompt.
    pub herbal_top_k: usize,
    pub enrichment: EnrichmentSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            herbal_top_k: 2,
            enrichment: EnrichmentSettings::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            herbal_top_k: settings.herbal.top_k,
            enrichment: settings.enrichment.clone(),
        }
    }

    pub fn with_herbal_top_k(mut self, k: usize) -> Self {
        self.herbal_top_k = k;
        self
    }

    pub fn with_enrichment(mut self, enrichment: EnrichmentSettings) -> Self {
        self.enrichment = enrichment;
        self
    }
}

/// Everything one research run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchOutcome {
    pub query: String,
    pub core_query: String,
    pub tier: Option<SearchTier>,
    pub attempts: Vec<TierAttempt>,
    pub articles: Vec<ArticleRecord>,
    pub plant_names: Vec<String>,
    pub enrichment: EnrichmentTable,
    pub excerpts: Vec<ScoredExcerpt>,
    /// Raw model output, or the fixed failure message.
    pub synthesis: String,
}

impl ResearchOutcome {
    /// Articles keyed by PMID, for resolving `[PMID:<id>]` citations.
    pub fn articles_by_id(&self) -> HashMap<&str, &ArticleRecord> {
        self.articles.iter().map(|a| (a.id.as_str(), a)).collect()
    }

    pub fn found_literature(&self) -> bool {
        !self.articles.is_empty()
    }
}

/// Runs research queries against a literature source, the herbal table and an
/// LLM backend.
pub struct ResearchPipeline {
    planner: QueryPlanner,
    source: Arc<dyn LiteratureSource>,
    herbal: Arc<HerbalStore>,
    backend: Arc<dyn LlmBackend>,
    enricher: NameEnricher,
    config: PipelineConfig,
}

impl ResearchPipeline {
    pub fn new(
        source: Arc<dyn LiteratureSource>,
        herbal: Arc<HerbalStore>,
        backend: Arc<dyn LlmBackend>,
    ) -> Self {
        Self::with_config(source, herbal, backend, PipelineConfig::default())
    }

    pub fn with_config(
        source: Arc<dyn LiteratureSource>,
        herbal: Arc<HerbalStore>,
        backend: Arc<dyn LlmBackend>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            planner: QueryPlanner::new(source.clone()),
            enricher: NameEnricher::from_settings(&config.enrichment),
            source,
            herbal,
            backend,
            config,
        }
    }

    pub fn backend(&self) -> &dyn LlmBackend {
        self.backend.as_ref()
    }

    /// Run one query. Progress lines are forwarded to `progress` as they occur.
    pub async fn run(&self, query: &str, progress: ProgressFn<'_>) -> Result<ResearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(EweError::missing_input("query"));
        }

        tracing::info!(
            query,
            source = self.source.name(),
            backend = self.backend.name(),
            "research started"
        );

        let search = self.planner.search(query, progress).await;

        let articles = if search.is_empty() {
            Vec::new()
        } else {
            progress(&format!("Fetching {} article abstracts...", search.ids.len()));
            self.source.fetch_articles(&search.ids).await
        };

        let plant_names = extract_plant_names(&articles);
        let excerpts = self.herbal.search(query, self.config.herbal_top_k);

        let enrichment = if plant_names.is_empty() {
            Vec::new()
        } else {
            let count = plant_names.len().min(self.config.enrichment.max_names);
            progress(&format!("Looking up local names for {} plants...", count));
            self.enricher.enrich(self.backend.as_ref(), &plant_names).await
        };

        progress("Synthesizing findings...");
        let context: Vec<HerbalExcerpt> = excerpts.iter().map(|s| s.excerpt.clone()).collect();
        let prompt = SynthesisPrompt::new(query, &articles)
            .with_excerpts(&context)
            .with_enrichment(&enrichment);
        let synthesis = synthesize_report(self.backend.as_ref(), &prompt).await;

        tracing::info!(
            tier = ?search.tier,
            articles = articles.len(),
            plants = plant_names.len(),
            excerpts = excerpts.len(),
            "research complete"
        );

        Ok(ResearchOutcome {
            query: query.to_string(),
            core_query: search.core_query,
            tier: search.tier,
            attempts: search.attempts,
            articles,
            plant_names,
            enrichment,
            excerpts,
            synthesis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ewe_literature::MockSource;
    use ewe_llm::{MockBackend, SYNTHESIS_FAILURE_MESSAGE};

    fn quiet(_: &str) {}

    fn pipeline(source: MockSource, backend: MockBackend) -> ResearchPipeline {
        let config = PipelineConfig::default().with_enrichment(EnrichmentSettings {
            batch_delay_ms: 0,
            ..EnrichmentSettings::default()
        });
        ResearchPipeline::with_config(
            Arc::new(source),
            Arc::new(HerbalStore::builtin()),
            Arc::new(backend),
            config,
        )
    }

    #[tokio::test]
    async fn test_blank_query_is_missing_input() {
        let p = pipeline(MockSource::new(), MockBackend::new());
        let err = p.run("   ", &quiet).await.unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_no_literature_still_synthesizes_from_excerpts() {
        let p = pipeline(MockSource::new(), MockBackend::new().with_default_response("report"));

        let outcome = p.run("kola nut", &quiet).await.unwrap();

        assert!(!outcome.found_literature());
        assert_eq!(outcome.tier, None);
        assert_eq!(outcome.attempts.len(), 3);
        assert_eq!(outcome.excerpts.len(), 2);
        assert_eq!(outcome.synthesis, "report");
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_no_articles() {
        let source = MockSource::new().with_search(SearchTier::Strict.build_term("neem"), &["5"]);
        let p = pipeline(source, MockBackend::new().with_failure("Question:"));

        let outcome = p.run("neem", &quiet).await.unwrap();

        assert_eq!(outcome.tier, Some(SearchTier::Strict));
        assert!(outcome.articles.is_empty());
        assert_eq!(outcome.synthesis, SYNTHESIS_FAILURE_MESSAGE);
    }

    #[test]
    fn test_articles_by_id() {
        let outcome = ResearchOutcome {
            query: "q".into(),
            core_query: "q".into(),
            tier: None,
            attempts: Vec::new(),
            articles: vec![ArticleRecord::new("1", "a"), ArticleRecord::new("2", "b")],
            plant_names: Vec::new(),
            enrichment: Vec::new(),
            excerpts: Vec::new(),
            synthesis: String::new(),
        };

        let map = outcome.articles_by_id();
        assert_eq!(map.len(), 2);
        assert_eq!(map["2"].title, "b");
    }
}
