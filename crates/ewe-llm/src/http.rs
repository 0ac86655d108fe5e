//! HTTP plumbing shared by the hosted backends.

use crate::backend::{LlmError, LlmResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// A JSON-over-HTTPS completion endpoint for one provider.
pub(crate) struct Endpoint {
    client: reqwest::Client,
    pub(crate) url: String,
    provider: &'static str,
    timeout_secs: u32,
}

impl Endpoint {
    pub(crate) fn new(provider: &'static str, url: &str, timeout_secs: u32) -> LlmResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(timeout_secs)))
            .build()
            .map_err(|e| LlmError::ConnectionFailed(format!("{} client: {}", provider, e)))?;

        Ok(Self {
            client,
            url: url.to_string(),
            provider,
            timeout_secs,
        })
    }

    /// POST `body` with `headers` and decode the JSON answer.
    ///
    /// `model` and `is_context_error` refine the error for 404 and 400
    /// answers respectively.
    pub(crate) async fn post<B, R>(
        &self,
        headers: &[(&str, String)],
        body: &B,
        model: &str,
        is_context_error: fn(&str) -> bool,
    ) -> LlmResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut request = self.client.post(&self.url).json(body);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(self.provider, status, &text, model, is_context_error));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("{}: {}", self.provider, e)))
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            LlmError::ConnectionFailed(format!("cannot reach {} at {}", self.provider, self.url))
        } else {
            LlmError::ApiError(e.to_string())
        }
    }
}

/// Map a non-2xx answer onto [`LlmError`].
pub(crate) fn status_error(
    provider: &str,
    status: u16,
    body: &str,
    model: &str,
    is_context_error: fn(&str) -> bool,
) -> LlmError {
    match status {
        401 | 403 => LlmError::AuthenticationFailed,
        404 => LlmError::ModelNotFound(model.to_string()),
        429 => LlmError::RateLimited(60),
        400 if is_context_error(body) => LlmError::ContextTooLong,
        _ => LlmError::ApiError(format!("{} answered HTTP {}: {}", provider, status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: &str) -> bool {
        false
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error("claude", 401, "", "m", never),
            LlmError::AuthenticationFailed
        ));
        assert!(matches!(
            status_error("claude", 429, "", "m", never),
            LlmError::RateLimited(60)
        ));
        match status_error("openai", 404, "", "gpt-x", never) {
            LlmError::ModelNotFound(model) => assert_eq!(model, "gpt-x"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            status_error("openai", 400, "too long", "m", |b| b.contains("long")),
            LlmError::ContextTooLong
        ));
        assert!(matches!(
            status_error("openai", 400, "bad field", "m", never),
            LlmError::ApiError(_)
        ));
    }
}
