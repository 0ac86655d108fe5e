//! The search/fetch seam.

use crate::error::{LiteratureError, LiteratureResult};
use crate::xml::parse_article_set;
use async_trait::async_trait;
use ewe_core::types::ArticleRecord;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Progress callback: human-readable status lines for display only.
pub type ProgressFn<'a> = &'a (dyn Fn(&str) + Send + Sync);

/// A literature database reachable through a search call and a fetch call.
#[async_trait]
pub trait LiteratureSource: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Run a search term, returning matching record ids.
    async fn search_ids(&self, term: &str) -> LiteratureResult<Vec<String>>;

    /// Fetch records for `ids` as raw XML.
    async fn fetch_xml(&self, ids: &[String]) -> LiteratureResult<String>;

    /// Fetch and parse records. Any failure degrades to an empty list.
    async fn fetch_articles(&self, ids: &[String]) -> Vec<ArticleRecord> {
        if ids.is_empty() {
            return Vec::new();
        }
        match self.fetch_xml(ids).await {
            Ok(xml) => parse_article_set(&xml),
            Err(e) => {
                tracing::warn!(source = self.name(), count = ids.len(), error = %e, "fetch failed; continuing without articles");
                Vec::new()
            }
        }
    }
}

/// Pull `esearchresult.idlist` out of an esearch JSON response.
pub fn parse_id_list(value: &Value) -> LiteratureResult<Vec<String>> {
    let list = value
        .get("esearchresult")
        .and_then(|r| r.get("idlist"))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            LiteratureError::InvalidResponse("missing esearchresult.idlist".to_string())
        })?;

    Ok(list
        .iter()
        .filter_map(|id| match id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect())
}

/// In-memory source for tests and offline demos.
///
/// Search results are keyed by exact term; unknown terms return no ids.
#[derive(Default)]
pub struct MockSource {
    results: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    xml: Option<String>,
    searches: Mutex<Vec<String>>,
    fetches: Mutex<Vec<Vec<String>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `ids` when `term` is searched.
    pub fn with_search(mut self, term: impl Into<String>, ids: &[&str]) -> Self {
        self.results
            .insert(term.into(), ids.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Fail with a connection error when `term` is searched.
    pub fn with_failing_search(mut self, term: impl Into<String>) -> Self {
        self.failing.insert(term.into());
        self
    }

    /// XML returned by every fetch. Without it, fetches fail.
    pub fn with_xml(mut self, xml: impl Into<String>) -> Self {
        self.xml = Some(xml.into());
        self
    }

    /// Terms searched so far, in call order.
    pub fn searches(&self) -> Vec<String> {
        self.searches
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Id batches fetched so far, in call order.
    pub fn fetches(&self) -> Vec<Vec<String>> {
        self.fetches
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LiteratureSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search_ids(&self, term: &str) -> LiteratureResult<Vec<String>> {
        if let Ok(mut log) = self.searches.lock() {
            log.push(term.to_string());
        }
        if self.failing.contains(term) {
            return Err(LiteratureError::ConnectionFailed("mock failure".to_string()));
        }
        Ok(self.results.get(term).cloned().unwrap_or_default())
    }

    async fn fetch_xml(&self, ids: &[String]) -> LiteratureResult<String> {
        if let Ok(mut log) = self.fetches.lock() {
            log.push(ids.to_vec());
        }
        self.xml
            .clone()
            .ok_or_else(|| LiteratureError::ConnectionFailed("mock has no xml".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_string_and_numeric_ids() {
        let value = json!({
            "header": {"type": "esearch"},
            "esearchresult": {"count": "3", "idlist": ["111", 222, null]}
        });
        assert_eq!(parse_id_list(&value).unwrap(), vec!["111", "222"]);
    }

    #[test]
    fn missing_idlist_is_invalid() {
        let value = json!({"error": "API rate limit exceeded"});
        assert!(matches!(
            parse_id_list(&value),
            Err(LiteratureError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_empty() {
        let source = MockSource::new();
        let articles = source.fetch_articles(&["1".to_string()]).await;
        assert!(articles.is_empty());
        assert_eq!(source.fetches().len(), 1);
    }

    #[tokio::test]
    async fn empty_ids_skip_the_fetch() {
        let source = MockSource::new().with_xml("<PubmedArticleSet/>");
        assert!(source.fetch_articles(&[]).await.is_empty());
        assert!(source.fetches().is_empty());
    }
}
