// MCP over Server-Sent Events
//
// GET on the SSE path opens a session and announces where to POST messages.
// Responses to those messages come back on the same event stream.

use crate::api::ErrorResponse;
use crate::config::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: Uuid,
}

/// Open an event stream for a new session
pub async fn connect(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (id, mut rx) = state.sessions.open().await;
    let guard = state.sessions.guard(id);
    let endpoint = format!("{}?session_id={}", state.transport.message_path, id.simple());

    let stream = async_stream::stream! {
        let _guard = guard;
        yield Ok::<_, Infallible>(Event::default().event("endpoint").data(endpoint));

        while let Some(message) = rx.recv().await {
            yield Ok(Event::default().event("message").data(message));
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new().interval(Duration::from_secs(state.transport.keep_alive_secs)),
    )
}

/// Accept one JSON-RPC message for an open session
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SessionQuery>, QueryRejection>,
    body: String,
) -> Response {
    let Ok(Query(SessionQuery { session_id })) = query else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("session_id is required and must be a UUID")),
        )
            .into_response();
    };

    if !state.sessions.contains(&session_id).await {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Could not find session")),
        )
            .into_response();
    }

    if let Err(e) = serde_json::from_str::<serde_json::Value>(&body) {
        tracing::warn!(session_id = %session_id, error = %e, "Unparseable message");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_details("Could not parse message", e.to_string())),
        )
            .into_response();
    }

    tokio::spawn(async move {
        let Some(response) = state.mcp.handle_message(&body).await else {
            return;
        };

        let payload = match serde_json::to_string(&response) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(session_id = %session_id, error = %e, "Failed to serialize response");
                return;
            }
        };

        if let Err(e) = state.sessions.send(&session_id, payload).await {
            tracing::warn!(error = %e, "Dropping response");
        }
    });

    (StatusCode::ACCEPTED, "Accepted").into_response()
}
