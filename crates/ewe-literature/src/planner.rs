//! Tiered query planner.
//!
//! A strict early-exit waterfall over three search terms:
//!
//! 1. **Strict** — core query, Nigeria, medical/ethnobotanical context
//! 2. **National** — core query, Nigeria
//! 3. **Regional** — core query, West African region, medical context
//!
//! A tier runs only when every earlier tier returned zero ids. A failed search
//! counts as zero ids for that tier. Running out of tiers is a valid outcome.

use crate::source::{LiteratureSource, ProgressFn};
use crate::stopwords::clean_query;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Location clause for the national tiers.
pub const LOCATION_CLAUSE: &str = "(Nigeria OR Nigerian)";

/// Medical and ethnobotanical context terms.
pub const MEDICAL_CLAUSE: &str = "(medicinal OR ethnobotany OR ethnobotanical OR \"traditional medicine\" \
OR herbal OR phytochemical OR pharmacological OR \"plant extract\" OR antimicrobial OR antioxidant \
OR \"anti-inflammatory\" OR antimalarial OR antidiabetic OR toxicity OR therapeutic)";

/// Neighbouring countries and regions for the last tier.
pub const REGIONAL_CLAUSE: &str = "(Nigeria OR Ghana OR Benin OR Cameroon OR Togo OR Niger OR Chad \
OR \"West Africa\" OR \"West African\" OR \"Sub-Saharan Africa\")";

/// One of the three search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTier {
    Strict,
    National,
    Regional,
}

impl SearchTier {
    /// Tiers in the order they are tried.
    pub const ALL: [SearchTier; 3] = [SearchTier::Strict, SearchTier::National, SearchTier::Regional];

    pub fn number(&self) -> u8 {
        match self {
            SearchTier::Strict => 1,
            SearchTier::National => 2,
            SearchTier::Regional => 3,
        }
    }

    /// Search term for `core` under this tier.
    pub fn build_term(&self, core: &str) -> String {
        match self {
            SearchTier::Strict => format!("({}) AND {} AND {}", core, LOCATION_CLAUSE, MEDICAL_CLAUSE),
            SearchTier::National => format!("({}) AND {}", core, LOCATION_CLAUSE),
            SearchTier::Regional => format!("({}) AND {} AND {}", core, REGIONAL_CLAUSE, MEDICAL_CLAUSE),
        }
    }

    /// Status line shown before the tier's search runs.
    pub fn progress_message(&self) -> &'static str {
        match self {
            SearchTier::Strict => "Searching Nigerian ethnomedical literature...",
            SearchTier::National => "No strict matches, broadening to all Nigerian studies...",
            SearchTier::Regional => "Still nothing, widening to West African regional studies...",
        }
    }
}

impl fmt::Display for SearchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchTier::Strict => "strict",
            SearchTier::National => "national",
            SearchTier::Regional => "regional",
        };
        write!(f, "tier {} ({})", self.number(), label)
    }
}

/// Record of one executed tier.
#[derive(Debug, Clone, Serialize)]
pub struct TierAttempt {
    pub tier: SearchTier,
    pub term: String,
    pub hits: usize,
    /// The search itself failed; `hits` is 0.
    pub failed: bool,
}

/// Planner outcome.
#[derive(Debug, Clone, Serialize)]
pub struct TieredSearch {
    /// Stop-word-stripped query.
    pub core_query: String,
    /// Ids from the first tier that found any; empty if none did.
    pub ids: Vec<String>,
    /// The tier that produced `ids`.
    pub tier: Option<SearchTier>,
    pub attempts: Vec<TierAttempt>,
}

impl TieredSearch {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Broadens a query across [`SearchTier::ALL`] until ids are found.
pub struct QueryPlanner {
    source: Arc<dyn LiteratureSource>,
}

impl QueryPlanner {
    pub fn new(source: Arc<dyn LiteratureSource>) -> Self {
        Self { source }
    }

    pub async fn search(&self, raw_query: &str, progress: ProgressFn<'_>) -> TieredSearch {
        let core_query = clean_query(raw_query);
        let mut attempts = Vec::with_capacity(SearchTier::ALL.len());

        for tier in SearchTier::ALL {
            let term = tier.build_term(&core_query);
            progress(tier.progress_message());
            tracing::debug!(%tier, term = %term, "running search tier");

            let (ids, failed) = match self.source.search_ids(&term).await {
                Ok(ids) => (ids, false),
                Err(e) => {
                    tracing::warn!(%tier, error = %e, "search failed; treating as zero results");
                    (Vec::new(), true)
                }
            };

            attempts.push(TierAttempt {
                tier,
                term,
                hits: ids.len(),
                failed,
            });

            if !ids.is_empty() {
                tracing::info!(%tier, hits = ids.len(), core = %core_query, "literature found");
                return TieredSearch {
                    core_query,
                    ids,
                    tier: Some(tier),
                    attempts,
                };
            }
        }

        tracing::info!(core = %core_query, "no literature found in any tier");
        TieredSearch {
            core_query,
            ids: Vec::new(),
            tier: None,
            attempts,
        }
    }
}
