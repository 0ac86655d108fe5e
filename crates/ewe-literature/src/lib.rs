//! # Ewe Literature
//!
//! Everything between a user's question and a list of parsed PubMed records:
//!
//! - [`EutilsClient`] talks to NCBI E-utilities directly (used by the relay)
//! - [`ProxyClient`] talks to the relay's `/search` and `/fetch` endpoints
//! - [`QueryPlanner`] broadens a query across three tiers until ids are found
//! - [`parse_article_set`] turns efetch XML into [`ArticleRecord`]s
//!
//! [`ArticleRecord`]: ewe_core::types::ArticleRecord
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ewe_literature::{EutilsClient, LiteratureSource, QueryPlanner};
//!
//! let source = Arc::new(EutilsClient::new("https://eutils.ncbi.nlm.nih.gov/entrez/eutils")?);
//! let planner = QueryPlanner::new(source.clone());
//! let outcome = planner.search("bitter leaf for diabetes", &|msg| println!("{msg}")).await;
//! let articles = source.fetch_articles(&outcome.ids).await;
//! ```

mod client;
mod error;
mod planner;
mod proxy;
mod source;
mod stopwords;
mod xml;

pub use client::EutilsClient;
pub use error::{LiteratureError, LiteratureResult};
pub use planner::{
    QueryPlanner, SearchTier, TierAttempt, TieredSearch, LOCATION_CLAUSE, MEDICAL_CLAUSE,
    REGIONAL_CLAUSE,
};
pub use proxy::ProxyClient;
pub use source::{parse_id_list, LiteratureSource, MockSource, ProgressFn};
pub use stopwords::{clean_query, is_stop_word};
pub use xml::{parse_article_set, try_parse_article_set, MAX_AUTHORS};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{clean_query, parse_article_set};
    pub use crate::{EutilsClient, LiteratureSource, ProxyClient};
    pub use crate::{LiteratureError, LiteratureResult};
    pub use crate::{QueryPlanner, SearchTier, TieredSearch};
}
