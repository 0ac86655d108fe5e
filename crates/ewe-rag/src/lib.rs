//! # Ewe RAG
//!
//! Retrieval-augmented research over PubMed abstracts and a small herbal
//! reference table.
//!
//! ## Flow
//!
//! | Step | Component |
//! |------|-----------|
//! | Tiered search | [`ewe_literature::QueryPlanner`] |
//! | Fetch + parse | [`ewe_literature::LiteratureSource::fetch_articles`] |
//! | Candidate plant names | [`extract_plant_names`] |
//! | Reference excerpts | [`HerbalStore::search`] |
//! | Local names | [`ewe_llm::NameEnricher`] |
//! | Report | [`ewe_llm::synthesize_report`] |
//!
//! [`ResearchPipeline`] runs the whole flow for one query.

pub mod extract;
pub mod herbal;
pub mod pipeline;
pub mod prelude;

pub use extract::extract_plant_names;
pub use herbal::{HerbalStore, ScoredExcerpt};
pub use pipeline::{PipelineConfig, ResearchOutcome, ResearchPipeline};
