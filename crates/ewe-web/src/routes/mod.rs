//! HTTP and WebSocket routes.

mod api;
mod ws;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub use api::{FetchParams, HealthResponse, ResearchRequest, SearchParams};
pub use ws::{ClientRequest, ServerEvent};

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        // PubMed relay
        .route("/api/pubmed/search", get(api::pubmed_search))
        .route("/api/pubmed/fetch", get(api::pubmed_fetch))
        // Research
        .route("/api/research", post(api::research))
        .route("/ws/research", get(ws::research_handler))
        // Browser clients call the relay cross-origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
