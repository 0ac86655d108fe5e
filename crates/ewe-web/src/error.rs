//! JSON error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ewe_core::error::{EweError, USER_FACING_ERROR};
use serde::Serialize;

/// An error rendered as `{ "error": ..., "details": ... }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            details: None,
        }
    }

    /// Upstream call failed; `details` carries the cause.
    pub fn upstream(error: impl Into<String>, details: impl ToString) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.into(),
            details: Some(details.to_string()),
        }
    }
}

impl From<EweError> for ApiError {
    fn from(err: EweError) -> Self {
        if err.is_client_error() {
            Self::bad_request(err.to_string())
        } else {
            tracing::error!(error = %err, "request failed");
            Self::upstream(USER_FACING_ERROR, err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.error,
            details: self.details.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}
