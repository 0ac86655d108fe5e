//! # Ewe
//!
//! A literature research assistant for Nigerian traditional medicine.
//!
//! Ewe turns a free-text question ("what is bitter leaf used for?") into a
//! cited Markdown report: it searches PubMed with progressively broader terms,
//! parses the returned abstracts, pulls out candidate plant names, looks up
//! their Yoruba, Igbo and Hausa names, adds matching pharmacopoeia excerpts and
//! hands the lot to a hosted language model.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ewe::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<()> {
//! let source = Arc::new(EutilsClient::new("https://eutils.ncbi.nlm.nih.gov/entrez/eutils")?);
//! let backend = Arc::new(MockBackend::new().with_default_response("## Summary\n..."));
//! let pipeline = ResearchPipeline::new(source, Arc::new(HerbalStore::builtin()), backend);
//!
//! let outcome = pipeline.run("bitter leaf for malaria", &|line: &str| println!("{line}")).await?;
//! println!("{}", outcome.synthesis);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`ewe_core`] - Shared types, errors, settings
//! - [`ewe_literature`] - Tiered query planner, E-utilities and proxy clients, XML parser
//! - [`ewe_embeddings`] - Placeholder embedder and cosine similarity
//! - [`ewe_llm`] - Completion backends, prompts, name enrichment
//! - [`ewe_rag`] - Plant-name extraction, herbal table, research pipeline
//!
//! ## Search tiers
//!
//! | Tier | Term |
//! |------|------|
//! | 1 strict | core AND Nigeria AND medical context |
//! | 2 national | core AND Nigeria |
//! | 3 regional | core AND West Africa AND medical context |
//!
//! A tier runs only when every earlier tier found nothing.

pub use ewe_core as core;
pub use ewe_embeddings as embeddings;
pub use ewe_literature as literature;
pub use ewe_llm as llm;
pub use ewe_rag as rag;

/// Prelude module for convenient imports.
///
/// ```rust
/// use ewe::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use ewe_core::prelude::*;

    // Literature
    pub use ewe_literature::{
        clean_query, parse_article_set, EutilsClient, LiteratureError, LiteratureSource,
        MockSource, ProgressFn, ProxyClient, QueryPlanner, SearchTier, TieredSearch,
    };

    // Embeddings
    pub use ewe_embeddings::{cosine_similarity, Embedder, PlaceholderEmbedder};

    // LLM
    pub use ewe_llm::{
        synthesize_report, LlmBackend, LlmConfig, LlmError, LlmResult, MockBackend, NameEnricher,
        PromptTemplate, SynthesisPrompt, SYNTHESIS_FAILURE_MESSAGE,
    };

    #[cfg(feature = "api")]
    pub use ewe_llm::{backend_from_settings, ClaudeBackend, OpenAiBackend};

    // RAG
    pub use ewe_rag::{
        extract_plant_names, HerbalStore, PipelineConfig, ResearchOutcome, ResearchPipeline,
        ScoredExcerpt,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
