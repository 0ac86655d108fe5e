//! Batched localized-name enrichment.

use crate::backend::LlmBackend;
use ewe_core::config::EnrichmentSettings;
use ewe_core::types::{EnrichmentTable, LocalNameRecord};
use futures::future::join_all;
use std::time::Duration;

/// Looks up localized names for scientific names in small concurrent batches.
///
/// At most `max_names` names are looked up. Requests inside a batch run
/// concurrently; batches run one after another with `batch_delay` in between.
/// A failed lookup yields [`LocalNameRecord::unresolved`]; enrichment itself
/// never fails.
#[derive(Debug, Clone)]
pub struct NameEnricher {
    max_names: usize,
    batch_size: usize,
    batch_delay: Duration,
}

impl Default for NameEnricher {
    fn default() -> Self {
        Self::from_settings(&EnrichmentSettings::default())
    }
}

impl NameEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &EnrichmentSettings) -> Self {
        Self {
            max_names: settings.max_names,
            batch_size: settings.batch_size.max(1),
            batch_delay: Duration::from_millis(settings.batch_delay_ms),
        }
    }

    pub fn with_max_names(mut self, max_names: usize) -> Self {
        self.max_names = max_names;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Enrich `names` in order. The table has one record per looked-up name.
    pub async fn enrich(&self, backend: &dyn LlmBackend, names: &[String]) -> EnrichmentTable {
        let capped = &names[..names.len().min(self.max_names)];
        if capped.len() < names.len() {
            tracing::debug!(
                requested = names.len(),
                kept = capped.len(),
                "capping enrichment candidates"
            );
        }

        let mut table = Vec::with_capacity(capped.len());
        for (i, batch) in capped.chunks(self.batch_size).enumerate() {
            if i > 0 && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }

            let lookups = batch.iter().map(|name| lookup_or_placeholder(backend, name));
            table.extend(join_all(lookups).await);
        }

        let unresolved = table.iter().filter(|r| r.is_unresolved()).count();
        tracing::info!(names = table.len(), unresolved, "enrichment complete");
        table
    }
}

async fn lookup_or_placeholder(backend: &dyn LlmBackend, name: &str) -> LocalNameRecord {
    match backend.lookup_local_names(name).await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(name, error = %e, "local name lookup failed");
            LocalNameRecord::unresolved(name, "Local names could not be retrieved.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn fast() -> NameEnricher {
        NameEnricher::new().with_batch_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_caps_at_max_names() {
        let backend = MockBackend::new().with_default_response(r#"{"isNativeToNigeria": true}"#);
        let many: Vec<String> = (0..14).map(|i| format!("Genus species{i}")).collect();

        let table = fast().enrich(&backend, &many).await;

        assert_eq!(table.len(), 10);
        assert_eq!(backend.prompts().len(), 10);
        assert_eq!(table[9].scientific_name, "Genus species9");
    }

    #[tokio::test]
    async fn test_failure_degrades_to_placeholder() {
        let backend = MockBackend::new()
            .with_failure("Khaya senegalensis")
            .with_response("Moringa oleifera", r#"{"commonName": "Moringa", "isNativeToNigeria": false}"#)
            .with_default_response("not json at all");

        let table = fast()
            .enrich(
                &backend,
                &names(&["Khaya senegalensis", "Moringa oleifera", "Ocimum gratissimum"]),
            )
            .await;

        assert_eq!(table.len(), 3);
        assert!(table[0].is_unresolved());
        assert!(!table[0].native_to_nigeria);
        assert_eq!(table[0].scientific_name, "Khaya senegalensis");
        assert_eq!(table[1].common_name.as_deref(), Some("Moringa"));
        assert!(table[2].is_unresolved());
    }

    #[tokio::test]
    async fn test_preserves_order_across_batches() {
        let backend = MockBackend::new().with_default_response("{}");
        let input = names(&["A aaaa", "B bbbb", "C cccc", "D dddd", "E eeee"]);

        let table = fast().with_batch_size(2).enrich(&backend, &input).await;

        let got: Vec<_> = table.iter().map(|r| r.scientific_name.as_str()).collect();
        assert_eq!(got, vec!["A aaaa", "B bbbb", "C cccc", "D dddd", "E eeee"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_batches() {
        let backend = MockBackend::new().with_default_response("{}");
        let input = names(&["A aaaa", "B bbbb", "C cccc", "D dddd"]);
        let start = tokio::time::Instant::now();

        NameEnricher::new().enrich(&backend, &input).await;

        // Two batches of three, one delay.
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let backend = MockBackend::new();
        assert!(fast().enrich(&backend, &[]).await.is_empty());
        assert!(backend.prompts().is_empty());
    }
}
