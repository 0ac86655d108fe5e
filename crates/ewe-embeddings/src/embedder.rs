//! The embedding capability and its errors.

use crate::vector::cosine_similarity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Turns text into fixed-width vectors that can be compared by cosine.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>>;

    /// Width of every vector returned by [`Embedder::embed`].
    fn dimension(&self) -> usize;

    /// Stable identifier, logged next to search results.
    fn model_name(&self) -> &str;

    /// Cosine similarity that refuses vectors of different widths instead of
    /// silently scoring them zero.
    fn similarity(&self, a: &[f32], b: &[f32]) -> EmbeddingResult<f32> {
        match (a.len(), b.len()) {
            (expected, got) if expected != got => {
                Err(EmbeddingError::DimensionMismatch { expected, got })
            }
            _ => Ok(cosine_similarity(a, b)),
        }
    }
}
