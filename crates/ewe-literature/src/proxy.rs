//! Client for the same-origin search/fetch relay.

use crate::error::{LiteratureError, LiteratureResult};
use crate::source::{parse_id_list, LiteratureSource};
use async_trait::async_trait;
use ewe_core::config::LiteratureSettings;
use serde_json::Value;
use std::time::Duration;

/// Talks to `<base>/search?term=` and `<base>/fetch?ids=`.
pub struct ProxyClient {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl ProxyClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> LiteratureResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LiteratureError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        })
    }

    pub fn from_settings(settings: &LiteratureSettings) -> LiteratureResult<Self> {
        Self::new(&settings.proxy_base_url, settings.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> LiteratureResult<reqwest::Response> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(query)
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
        Ok(response)
    }
}

#[async_trait]
impl LiteratureSource for ProxyClient {
    fn name(&self) -> &str {
        "proxy"
    }

    async fn search_ids(&self, term: &str) -> LiteratureResult<Vec<String>> {
        let response = self.get("search", &[("term", term.to_string())]).await?;
        let value: Value = response
            .json()
            .await
            .map_err(|e| LiteratureError::InvalidResponse(e.to_string()))?;
        parse_id_list(&value)
    }

    async fn fetch_xml(&self, ids: &[String]) -> LiteratureResult<String> {
        if ids.is_empty() {
            return Err(LiteratureError::MissingInput("ids"));
        }
        let response = self.get("fetch", &[("ids", ids.join(","))]).await?;
        response
            .text()
            .await
            .map_err(|e| LiteratureError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_from_settings() {
        let client = ProxyClient::from_settings(&LiteratureSettings::default()).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:3000/api/pubmed");
    }

    #[tokio::test]
    async fn unreachable_proxy_is_a_connection_error() {
        let client = ProxyClient::new("http://127.0.0.1:9/api/pubmed", 2).unwrap();
        let result = client.search_ids("neem").await;
        assert!(matches!(
            result,
            Err(LiteratureError::ConnectionFailed(_))
                | Err(LiteratureError::Timeout(_))
                | Err(LiteratureError::Client(_))
        ));
    }
}
