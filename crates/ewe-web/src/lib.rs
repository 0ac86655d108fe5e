//! # Ewe Web
//!
//! HTTP front for Ewe. Relays PubMed E-utilities calls for browser clients
//! and runs research queries server-side.
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the server (reads ewe.toml and .env)
//! cargo run -p ewe-web -- --bind 127.0.0.1:3000
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/health` | Liveness and configured backend |
//! | GET | `/api/pubmed/search?term=` | esearch JSON, verbatim |
//! | GET | `/api/pubmed/fetch?ids=` | efetch XML, verbatim |
//! | POST | `/api/research` | Run one research query |
//! | WS | `/ws/research` | Research with streamed progress |
//!
//! Proxy errors are JSON `{ "error": ..., "details": ... }` with status 400
//! for missing input and 500 for upstream failures.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
