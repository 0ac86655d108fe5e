//! Single-call research synthesis.

use crate::backend::LlmBackend;
use crate::prompt::SynthesisPrompt;

/// Shown in place of the report when the completion call fails.
pub const SYNTHESIS_FAILURE_MESSAGE: &str =
    "Sorry, I could not generate a research summary right now. Please try again in a moment.";

/// Run one synthesis call. The model's text is returned unmodified; any
/// failure is logged and replaced by [`SYNTHESIS_FAILURE_MESSAGE`].
pub async fn synthesize_report(backend: &dyn LlmBackend, prompt: &SynthesisPrompt<'_>) -> String {
    tracing::debug!(
        backend = backend.name(),
        articles = prompt.articles.len(),
        excerpts = prompt.excerpts.len(),
        enrichment = prompt.enrichment.len(),
        "synthesizing report"
    );

    match backend.synthesize(prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(backend = backend.name(), error = %e, "synthesis failed");
            SYNTHESIS_FAILURE_MESSAGE.to_string()
        }
    }
}
