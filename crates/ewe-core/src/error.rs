//! Error types for Ewe operations.
//!
//! Component boundaries absorb upstream and malformed-response failures and
//! degrade to empty or placeholder values; what remains here is what a caller
//! actually has to handle.

use std::error::Error;
use std::fmt;

/// The one failure message shown to a user when a whole research run fails.
pub const USER_FACING_ERROR: &str = "An error occurred, please try again.";

/// Result type for Ewe operations.
pub type Result<T> = std::result::Result<T, EweError>;

/// Errors that can occur during Ewe operations.
#[derive(Debug, Clone)]
pub enum EweError {
    /// A required input was absent or blank.
    MissingInput(String),
    /// An upstream service could not be reached or answered non-2xx.
    Upstream(UpstreamError),
    /// An upstream answered, but with something we could not read.
    Malformed(String),
    /// Configuration errors.
    Config(ConfigError),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for EweError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EweError::MissingInput(what) => write!(f, "Missing required input: {}", what),
            EweError::Upstream(e) => write!(f, "Upstream error: {}", e),
            EweError::Malformed(msg) => write!(f, "Malformed response: {}", msg),
            EweError::Config(e) => write!(f, "Config error: {}", e),
            EweError::Io(msg) => write!(f, "I/O error: {}", msg),
            EweError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for EweError {}

impl From<std::io::Error> for EweError {
    fn from(e: std::io::Error) -> Self {
        EweError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for EweError {
    fn from(e: serde_json::Error) -> Self {
        EweError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for EweError {
    fn from(e: toml::de::Error) -> Self {
        EweError::Serialization(e.to_string())
    }
}

/// Upstream failures.
#[derive(Debug, Clone)]
pub enum UpstreamError {
    /// Connection refused, DNS failure, timeout.
    Unreachable { service: String, reason: String },
    /// The service answered with a non-success status.
    Status { service: String, status: u16 },
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Unreachable { service, reason } => {
                write!(f, "{} unreachable: {}", service, reason)
            }
            UpstreamError::Status { service, status } => {
                write!(f, "{} answered HTTP {}", service, status)
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// Missing required field.
    MissingField(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
            ConfigError::MissingField(field) => write!(f, "Missing required field: {}", field),
        }
    }
}

// Convenience constructors
impl EweError {
    pub fn missing_input(what: impl Into<String>) -> Self {
        EweError::MissingInput(what.into())
    }

    pub fn unreachable(service: impl Into<String>, reason: impl Into<String>) -> Self {
        EweError::Upstream(UpstreamError::Unreachable {
            service: service.into(),
            reason: reason.into(),
        })
    }

    pub fn upstream_status(service: impl Into<String>, status: u16) -> Self {
        EweError::Upstream(UpstreamError::Status {
            service: service.into(),
            status,
        })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EweError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn missing_config(field: impl Into<String>) -> Self {
        EweError::Config(ConfigError::MissingField(field.into()))
    }

    /// Whether the failure came from the caller rather than a dependency.
    pub fn is_client_error(&self) -> bool {
        matches!(self, EweError::MissingInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = EweError::missing_input("query");
        assert_eq!(e.to_string(), "Missing required input: query");
        assert!(e.is_client_error());

        let e = EweError::upstream_status("esearch", 502);
        assert_eq!(e.to_string(), "Upstream error: esearch answered HTTP 502");
        assert!(!e.is_client_error());

        let e = EweError::invalid_config("llm.provider", "gemini", "expected claude or openai");
        assert!(e.to_string().contains("llm.provider"));
    }

    #[test]
    fn json_errors_convert() {
        let err: EweError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, EweError::Serialization(_)));
    }
}
