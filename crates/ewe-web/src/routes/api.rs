//! REST endpoints: health, PubMed relay, research.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use ewe_rag::ResearchOutcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub llm_backend: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        llm_backend: state.backend_name().map(str::to_string),
    })
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
}

/// Relay an esearch call. The upstream JSON is returned untouched.
pub async fn pubmed_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let term = params
        .term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing required query parameter: term"))?;

    tracing::debug!(term, "relaying esearch");
    let value = state.eutils().search_raw(term).await.map_err(|e| {
        tracing::error!(error = %e, "esearch relay failed");
        ApiError::upstream("Failed to search PubMed", e)
    })?;

    Ok(Json(value))
}

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    pub ids: Option<String>,
}

/// Relay an efetch call. The upstream XML is returned untouched.
pub async fn pubmed_fetch(
    State(state): State<AppState>,
    Query(params): Query<FetchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let ids: Vec<String> = params
        .ids
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        return Err(ApiError::bad_request("Missing required query parameter: ids"));
    }

    tracing::debug!(count = ids.len(), "relaying efetch");
    let xml = state.eutils().fetch_raw(&ids).await.map_err(|e| {
        tracing::error!(error = %e, "efetch relay failed");
        ApiError::upstream("Failed to fetch PubMed records", e)
    })?;

    Ok(([(header::CONTENT_TYPE, "text/xml")], xml))
}

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub query: String,
}

/// Run one research query to completion.
pub async fn research(
    State(state): State<AppState>,
    body: Result<Json<ResearchRequest>, JsonRejection>,
) -> Result<Json<ResearchOutcome>, ApiError> {
    let Json(req) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let progress = |line: &str| tracing::debug!(line, "research progress");
    let outcome = state.research(&req.query, &progress).await?;
    Ok(Json(outcome))
}
