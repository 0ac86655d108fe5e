//! WebSocket research stream.
//!
//! The client sends `{"query": "..."}`; the server answers with any number of
//! `{"type":"progress","message":...}` events followed by exactly one
//! `{"type":"result","outcome":...}` or `{"type":"error","message":...}`.
//! One query runs at a time per connection.

use crate::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use ewe_core::error::USER_FACING_ERROR;
use ewe_rag::ResearchOutcome;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A research request from the client.
#[derive(Debug, Deserialize)]
pub struct ClientRequest {
    pub query: String,
}

/// Events sent to the client.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerEvent {
    Progress { message: String },
    Result { outcome: Box<ResearchOutcome> },
    Error { message: String },
}

impl ServerEvent {
    fn error() -> Self {
        ServerEvent::Error {
            message: USER_FACING_ERROR.to_string(),
        }
    }
}

/// WebSocket upgrade handler for /ws/research.
pub async fn research_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    while let Some(msg) = socket.recv().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => break,
            _ => continue,
        };

        let sent = match serde_json::from_str::<ClientRequest>(&text) {
            Ok(req) => run_and_stream(&mut socket, &state, &req.query).await,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable research request");
                send(&mut socket, &ServerEvent::error()).await
            }
        };

        if sent.is_err() {
            tracing::debug!("client went away mid-stream");
            break;
        }
    }
}

/// Run the pipeline, forwarding progress lines as they are produced.
async fn run_and_stream(
    socket: &mut WebSocket,
    state: &AppState,
    query: &str,
) -> Result<(), axum::Error> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let progress = move |line: &str| {
        let _ = tx.send(line.to_string());
    };

    let run = state.research(query, &progress);
    tokio::pin!(run);

    let result = loop {
        tokio::select! {
            biased;
            Some(line) = rx.recv() => {
                send(socket, &ServerEvent::Progress { message: line }).await?;
            }
            result = &mut run => break result,
        }
    };

    while let Ok(line) = rx.try_recv() {
        send(socket, &ServerEvent::Progress { message: line }).await?;
    }

    let event = match result {
        Ok(outcome) => ServerEvent::Result {
            outcome: Box::new(outcome),
        },
        Err(e) => {
            tracing::error!(error = %e, "research over websocket failed");
            ServerEvent::error()
        }
    };
    send(socket, &event).await
}

async fn send(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), axum::Error> {
    match serde_json::to_string(event) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode server event");
            Ok(())
        }
    }
}
