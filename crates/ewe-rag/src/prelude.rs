//! Ewe RAG Prelude — convenient imports for common usage.
//!
//! ```rust
//! use ewe_rag::prelude::*;
//! ```

pub use crate::extract::extract_plant_names;
pub use crate::herbal::{HerbalStore, ScoredExcerpt};
pub use crate::pipeline::{PipelineConfig, ResearchOutcome, ResearchPipeline};
