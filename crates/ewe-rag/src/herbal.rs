//! Static herbal reference table.
//!
//! Four pharmacopoeia excerpts compiled into the binary, ranked against a query
//! by cosine similarity of placeholder embeddings. The ranking is an interface
//! stand-in, not semantic retrieval.

use ewe_core::types::{HerbalExcerpt, SourceCorpus};
use ewe_embeddings::{cosine_similarity, Embedder, PlaceholderEmbedder};
use serde::Serialize;

/// An excerpt with its similarity to the query.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredExcerpt {
    pub excerpt: HerbalExcerpt,
    pub score: f32,
}

/// Read-only excerpt table, built once and shared by handle.
#[derive(Debug, Clone)]
pub struct HerbalStore {
    excerpts: Vec<HerbalExcerpt>,
    embedder: PlaceholderEmbedder,
}

impl HerbalStore {
    /// Build a store, embedding any excerpt that arrives without a vector.
    pub fn new(excerpts: Vec<HerbalExcerpt>) -> Self {
        let embedder = PlaceholderEmbedder::default();
        let excerpts = excerpts
            .into_iter()
            .map(|mut excerpt| {
                if excerpt.embedding.is_empty() {
                    excerpt.embedding = embed_or_empty(&embedder, &excerpt.text);
                }
                excerpt
            })
            .collect();

        Self { excerpts, embedder }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// The compiled-in pharmacopoeia table.
    pub fn builtin() -> Self {
        use SourceCorpus::{
            NigerianHerbalPharmacopoeia as Nhp, WestAfricanHerbalPharmacopoeia as Wahp,
        };

        Self::new(vec![
            HerbalExcerpt::new(
                "NHP-VA-112",
                "Vernonia amygdalina (bitter leaf; Yoruba: ewuro, Igbo: onugbu, Hausa: shiwaka). \
                 The leaves are washed and squeezed in water; the bitter extract is taken for \
                 fever and malaria. Large doses may cause nausea and lower blood glucose.",
                Nhp,
                112,
            ),
            HerbalExcerpt::new(
                "NHP-OG-87",
                "Ocimum gratissimum (scent leaf; Yoruba: efinrin, Igbo: nchuanwu, Hausa: daidoya). \
                 A decoction of the leaves is used for diarrhoea, stomach upset and colds. \
                 The essential oil is antimicrobial; avoid concentrated oil in pregnancy.",
                Nhp,
                87,
            ),
            HerbalExcerpt::new(
                "WAHP-AI-45",
                "Azadirachta indica (neem; Yoruba and Hausa: dogonyaro). A decoction of leaves and \
                 stem bark is used against malaria and skin infections. Prolonged internal use \
                 has been associated with liver and kidney toxicity; not for infants.",
                Wahp,
                45,
            ),
            HerbalExcerpt::new(
                "WAHP-MO-203",
                "Moringa oleifera (drumstick tree; Yoruba: ewe igbale, Hausa: zogale). Dried leaf \
                 powder is added to food as a nutritional supplement and for hypertension and \
                 diabetes. Root bark is toxic and should not be used.",
                Wahp,
                203,
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.excerpts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.excerpts.is_empty()
    }

    pub fn excerpts(&self) -> &[HerbalExcerpt] {
        &self.excerpts
    }

    /// Up to `k` excerpts, best first. Ties keep table order.
    pub fn search(&self, query: &str, k: usize) -> Vec<ScoredExcerpt> {
        if self.excerpts.is_empty() {
            tracing::warn!("herbal reference table is empty");
            return Vec::new();
        }

        let query_vec = embed_or_empty(&self.embedder, query);
        let mut scored: Vec<ScoredExcerpt> = self
            .excerpts
            .iter()
            .map(|excerpt| ScoredExcerpt {
                score: cosine_similarity(&query_vec, &excerpt.embedding),
                excerpt: excerpt.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        tracing::debug!(
            model = self.embedder.model_name(),
            hits = scored.len(),
            "herbal search"
        );
        scored
    }
}

impl Default for HerbalStore {
    fn default() -> Self {
        Self::builtin()
    }
}

fn embed_or_empty(embedder: &PlaceholderEmbedder, text: &str) -> Vec<f32> {
    embedder.embed(text).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "placeholder embedding failed");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_has_four_unique_excerpts() {
        let store = HerbalStore::builtin();
        assert_eq!(store.len(), 4);

        let ids: HashSet<_> = store.excerpts().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
        assert!(store.excerpts().iter().all(|e| e.embedding.len() == 64));

        let sources: HashSet<_> = store.excerpts().iter().map(|e| e.source).collect();
        assert_eq!(sources.len(), 2);
    }

    #[test]
    fn test_search_returns_k_sorted() {
        let store = HerbalStore::builtin();
        let results = store.search("bitter leaf for malaria", 2);

        assert_eq!(results.len(), 2);
        assert!(results[0].score >= results[1].score);
    }

    #[test]
    fn test_search_k_larger_than_table() {
        let store = HerbalStore::builtin();
        assert_eq!(store.search("neem", 10).len(), 4);
        assert!(store.search("neem", 0).is_empty());
    }

    #[test]
    fn test_exact_text_scores_one() {
        let store = HerbalStore::builtin();
        let text = store.excerpts()[2].text.clone();

        let results = store.search(&text, 1);
        assert_eq!(results[0].excerpt.id, "WAHP-AI-45");
        assert!((results[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_store_returns_nothing() {
        assert!(HerbalStore::empty().search("anything", 3).is_empty());
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let results = HerbalStore::builtin().search("", 4);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.score == 0.0));
        assert_eq!(results[0].excerpt.id, "NHP-VA-112");
    }
}
