//! NCBI E-utilities client.
//!
//! The relay uses the raw variants so the JSON and XML reach the browser
//! untouched; the planner goes through [`LiteratureSource`].

use crate::error::{LiteratureError, LiteratureResult};
use crate::source::{parse_id_list, LiteratureSource};
use async_trait::async_trait;
use ewe_core::config::LiteratureSettings;
use serde_json::Value;
use std::time::Duration;

const DATABASE: &str = "pubmed";

/// Client for `esearch.fcgi` and `efetch.fcgi`.
pub struct EutilsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    retmax: u32,
    timeout_secs: u64,
}

impl EutilsClient {
    /// Create a client for the E-utilities at `base_url`.
    pub fn new(base_url: &str) -> LiteratureResult<Self> {
        Self::with_timeout(base_url, 20)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> LiteratureResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LiteratureError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            retmax: 20,
            timeout_secs,
        })
    }

    pub fn from_settings(settings: &LiteratureSettings) -> LiteratureResult<Self> {
        let mut client = Self::with_timeout(&settings.eutils_base_url, settings.timeout_secs)?
            .with_retmax(settings.retmax);
        client.api_key = settings.ncbi_api_key.clone();
        Ok(client)
    }

    /// Set the NCBI API key (raises the upstream rate limit).
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_retmax(mut self, retmax: u32) -> Self {
        self.retmax = retmax;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, utility: &str) -> String {
        format!("{}/{}.fcgi", self.base_url, utility)
    }

    fn with_key(&self, mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    /// Run esearch and return the response body as parsed JSON.
    pub async fn search_raw(&self, term: &str) -> LiteratureResult<Value> {
        if term.trim().is_empty() {
            return Err(LiteratureError::MissingInput("term"));
        }

        let params = self.with_key(vec![
            ("db", DATABASE.to_string()),
            ("retmode", "json".to_string()),
            ("retmax", self.retmax.to_string()),
            ("term", term.to_string()),
        ]);

        let response = self
            .client
            .get(self.endpoint("esearch"))
            .query(&params)
            .send()
            .await
            .map_err(|e| LiteratureError::from_transport(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LiteratureError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| LiteratureError::InvalidResponse(e.to_string()))
    }

    /// Run efetch for `ids` and return the XML body untouched.
    pub async fn fetch_raw(&self, ids: &[String]) -> LiteratureResult<String> {
        if ids.is_empty() {
            return Err(LiteratureError::MissingInput("ids"));
        }

        let params = self.with_key(vec![
            ("db", DATABASE.to_string()),
            ("retmode", "xml".to_string()),
            ("rettype", "abstract".to_string()),
            ("id", ids.join(",")),
        ]);

        let response = self
            .client
            .get(self.endpoint("efetch"))
            .query(&params)
            .send()
            .await
            .map_err(|e| LiteratureError::from_transport(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LiteratureError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| LiteratureError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl LiteratureSource for EutilsClient {
    fn name(&self) -> &str {
        "eutils"
    }

    async fn search_ids(&self, term: &str) -> LiteratureResult<Vec<String>> {
        let value = self.search_raw(term).await?;
        parse_id_list(&value)
    }

    async fn fetch_xml(&self, ids: &[String]) -> LiteratureResult<String> {
        self.fetch_raw(ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = EutilsClient::new("https://eutils.example/entrez/eutils/").unwrap();
        assert_eq!(client.base_url(), "https://eutils.example/entrez/eutils");
        assert_eq!(
            client.endpoint("esearch"),
            "https://eutils.example/entrez/eutils/esearch.fcgi"
        );
    }

    #[test]
    fn api_key_is_appended() {
        let client = EutilsClient::new("http://x").unwrap().with_api_key("k");
        let params = client.with_key(vec![("db", "pubmed".to_string())]);
        assert_eq!(params.last().unwrap(), &("api_key", "k".to_string()));
    }

    #[test]
    fn from_settings_copies_limits() {
        let mut settings = LiteratureSettings::default();
        settings.retmax = 5;
        settings.ncbi_api_key = Some("abc".into());
        let client = EutilsClient::from_settings(&settings).unwrap();
        assert_eq!(client.retmax, 5);
        assert_eq!(client.api_key.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn blank_inputs_are_rejected_before_any_request() {
        let client = EutilsClient::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(
            client.search_raw("  ").await,
            Err(LiteratureError::MissingInput("term"))
        ));
        assert!(matches!(
            client.fetch_raw(&[]).await,
            Err(LiteratureError::MissingInput("ids"))
        ));
    }
}
