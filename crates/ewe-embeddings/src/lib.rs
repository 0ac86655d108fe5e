//! # Ewe Embeddings
//!
//! Vector embeddings used to rank the static herbal reference table.
//!
//! The only embedder shipped is [`PlaceholderEmbedder`], a deterministic
//! byte-folding function. It gives the herbal lookup a stable interface; it
//! does not capture meaning, and ranking quality reflects that.
//!
//! ## Usage
//!
//! ```rust
//! use ewe_embeddings::{cosine_similarity, Embedder, PlaceholderEmbedder};
//!
//! let embedder = PlaceholderEmbedder::default();
//! let a = embedder.embed("bitter leaf").unwrap();
//! let b = embedder.embed("bitter leaf").unwrap();
//! assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-5);
//! ```

mod embedder;
mod vector;
mod placeholder;

pub use embedder::{Embedder, EmbeddingError, EmbeddingResult};
pub use vector::{cosine_similarity, dot_product, magnitude, normalize_l2};
pub use placeholder::{PlaceholderEmbedder, DEFAULT_DIMENSION};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cosine_similarity, normalize_l2};
    pub use crate::{Embedder, EmbeddingError, EmbeddingResult, PlaceholderEmbedder};
}
