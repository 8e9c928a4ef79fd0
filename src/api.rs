//! HTTP surface
//!
//! One webhook endpoint. Each POST carries a batch of transport events;
//! every event is decoded, handled, and replied to independently, so one
//! failing event never aborts its siblings.

use crate::engine::{CursorStore, Engine, SessionStore};
use crate::line::{Renderer, ReplySink, WebhookEnvelope, WebhookEvent};
use crate::places::PlaceSource;
use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use futures::future::join_all;
use std::sync::Arc;

/// Application state shared across handlers
pub struct AppState<P, S, C> {
    pub engine: Arc<Engine<P, S, C>>,
    pub renderer: Renderer,
    pub sink: Arc<dyn ReplySink>,
}

impl<P, S, C> Clone for AppState<P, S, C> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            renderer: self.renderer.clone(),
            sink: self.sink.clone(),
        }
    }
}

/// Create the API router
pub fn create_router<P, S, C>(state: AppState<P, S, C>) -> Router
where
    P: PlaceSource + 'static,
    S: SessionStore + 'static,
    C: CursorStore + 'static,
{
    Router::new()
        .route("/webhook", post(handle_webhook::<P, S, C>))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// The transport calls this with an already-verified envelope.
async fn handle_webhook<P, S, C>(
    State(state): State<AppState<P, S, C>>,
    Json(envelope): Json<WebhookEnvelope>,
) -> StatusCode
where
    P: PlaceSource + 'static,
    S: SessionStore + 'static,
    C: CursorStore + 'static,
{
    let handlers = envelope
        .events
        .into_iter()
        .filter_map(WebhookEvent::into_inbound)
        .map(|(user, reply_token, event)| {
            let state = state.clone();
            async move {
                let response = state.engine.handle_event(&user, event).await;
                let messages = state.renderer.render(&response);
                if let Err(e) = state.sink.reply(&reply_token, messages).await {
                    tracing::error!(user = %user, error = %e, "reply delivery failed");
                }
            }
        });

    join_all(handlers).await;
    StatusCode::OK
}
