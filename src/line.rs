//! LINE messaging transport
//!
//! Webhook envelope decoding, response-descriptor rendering into LINE
//! messages, and the outbound reply client. Channel signature verification
//! happens upstream of this process and is not handled here.

mod client;
mod render;
mod webhook;

pub use client::{LineClient, LineError};
pub use render::Renderer;
pub use webhook::{WebhookEnvelope, WebhookEvent};

use async_trait::async_trait;
use serde_json::Value;

/// Outbound reply delivery
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Send the rendered messages for one reply token. Each inbound event
    /// gets exactly one reply.
    async fn reply(&self, reply_token: &str, messages: Vec<Value>) -> Result<(), LineError>;
}

#[async_trait]
impl<T: ReplySink + ?Sized> ReplySink for std::sync::Arc<T> {
    async fn reply(&self, reply_token: &str, messages: Vec<Value>) -> Result<(), LineError> {
        (**self).reply(reply_token, messages).await
    }
}
