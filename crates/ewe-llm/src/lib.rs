//! # Ewe LLM
//!
//! Hosted completion backends and everything that talks to them:
//!
//! - [`LlmBackend`] — the capability interface; one implementation per provider
//! - [`SynthesisPrompt`] — the structured research prompt
//! - [`NameEnricher`] — batched localized-name lookups
//! - [`synthesize_report`] — one synthesis call that never fails outward
//!
//! ## Features
//!
//! - `api`: Hosted backends (Claude, OpenAI) and [`backend_from_settings`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ewe_llm::{backend_from_settings, synthesize_report, SynthesisPrompt};
//!
//! let backend = backend_from_settings(&settings.llm)?;
//! let prompt = SynthesisPrompt::new("bitter leaf for malaria", &articles);
//! let answer = synthesize_report(backend.as_ref(), &prompt).await;
//! ```

mod backend;
mod enrich;
mod prompt;
mod synthesis;

pub use backend::{LlmBackend, LlmConfig, LlmError, LlmResult, MockBackend};
pub use enrich::NameEnricher;
pub use prompt::{
    parse_local_name_json, render_enrichment, NameLookupPrompt, PromptTemplate, SynthesisPrompt,
};
pub use synthesis::{synthesize_report, SYNTHESIS_FAILURE_MESSAGE};

#[cfg(feature = "api")]
mod http;

#[cfg(feature = "api")]
mod claude;
#[cfg(feature = "api")]
pub use claude::ClaudeBackend;

#[cfg(feature = "api")]
mod openai;
#[cfg(feature = "api")]
pub use openai::OpenAiBackend;

#[cfg(feature = "api")]
mod factory;
#[cfg(feature = "api")]
pub use factory::backend_from_settings;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{LlmBackend, LlmConfig, LlmError, LlmResult};
    pub use crate::{NameEnricher, PromptTemplate, SynthesisPrompt};
    pub use crate::{synthesize_report, SYNTHESIS_FAILURE_MESSAGE};

    #[cfg(feature = "api")]
    pub use crate::{backend_from_settings, ClaudeBackend, OpenAiBackend};
}
