//! Literature client errors.

use ewe_core::error::EweError;
use thiserror::Error;

/// Errors from the search/fetch boundary.
#[derive(Debug, Error)]
pub enum LiteratureError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Result type for literature operations.
pub type LiteratureResult<T> = Result<T, LiteratureError>;

impl LiteratureError {
    /// Map a reqwest transport error, keeping timeouts and refusals distinct.
    pub(crate) fn from_transport(e: reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            LiteratureError::Timeout(timeout_secs)
        } else if e.is_connect() {
            LiteratureError::ConnectionFailed(e.to_string())
        } else {
            LiteratureError::Client(e.to_string())
        }
    }
}

impl From<LiteratureError> for EweError {
    fn from(e: LiteratureError) -> Self {
        match e {
            LiteratureError::MissingInput(what) => EweError::missing_input(what),
            LiteratureError::Status { status, .. } => EweError::upstream_status("pubmed", status),
            LiteratureError::InvalidResponse(msg) | LiteratureError::MalformedXml(msg) => {
                EweError::Malformed(msg)
            }
            other => EweError::unreachable("pubmed", other.to_string()),
        }
    }
}
