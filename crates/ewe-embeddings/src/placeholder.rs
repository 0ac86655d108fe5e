//! Byte-folding placeholder embedder.
//!
//! Each byte of the lowercased text is scaled into `[0, 1]` and added into
//! slot `position % dimension`; the result is L2-normalized. Deterministic
//! and dependency-free, and not a semantic representation.

use crate::vector::normalize_l2;
use crate::{Embedder, EmbeddingError, EmbeddingResult};

/// Dimension used by the herbal reference table.
pub const DEFAULT_DIMENSION: usize = 64;

/// Deterministic byte-folding embedder.
///
/// # Example
///
/// ```rust
/// use ewe_embeddings::{Embedder, PlaceholderEmbedder};
///
/// let embedder = PlaceholderEmbedder::new(32);
/// let vec = embedder.embed("Moringa oleifera").unwrap();
/// assert_eq!(vec.len(), 32);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderEmbedder {
    dimension: usize,
}

impl PlaceholderEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for PlaceholderEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl Embedder for PlaceholderEmbedder {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        if self.dimension == 0 {
            return Err(EmbeddingError::InvalidInput(
                "embedding dimension must be positive".to_string(),
            ));
        }

        let mut vector = vec![0.0f32; self.dimension];
        for (i, byte) in text.to_lowercase().bytes().enumerate() {
            vector[i % self.dimension] += f32::from(byte) / 255.0;
        }

        // Empty text stays a zero vector.
        normalize_l2(&mut vector);
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "placeholder-byte-fold"
    }
}
