//! Webhook envelope decoding
//!
//! Maps LINE's wire shapes onto the engine's event model. The transport
//! delivers a batch of events per POST; each decodes independently.

use crate::engine::{InboundEvent, UserId};
use crate::places::Coordinate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub message: Option<EventMessage>,
    #[serde(default)]
    pub postback: Option<Postback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Postback {
    pub data: String,
}

impl WebhookEvent {
    /// Decode into (user, reply token, engine event). `None` for events
    /// with no user or reply token (follow, unfollow, ...), which get no
    /// reply at all.
    pub fn into_inbound(self) -> Option<(UserId, String, InboundEvent)> {
        let user = UserId::new(self.source?.user_id?);
        let reply_token = self.reply_token?;

        let event = match self.kind.as_str() {
            "message" => self.message.map_or(InboundEvent::Unsupported, EventMessage::into_inbound),
            "postback" => self
                .postback
                .and_then(|p| serde_json::from_str(&p.data).ok())
                .map_or(InboundEvent::Unsupported, InboundEvent::Action),
            _ => return None,
        };

        Some((user, reply_token, event))
    }
}

impl EventMessage {
    fn into_inbound(self) -> InboundEvent {
        match self.kind.as_str() {
            "text" => match self.text {
                Some(text) => InboundEvent::Text { text },
                None => InboundEvent::Unsupported,
            },
            "location" => match (self.latitude, self.longitude) {
                (Some(lat), Some(lng)) => match Coordinate::new(lat, lng) {
                    Some(coordinate) => InboundEvent::Location { coordinate },
                    None => InboundEvent::Unsupported,
                },
                _ => InboundEvent::Unsupported,
            },
            // Stickers, images, audio, ...
            _ => InboundEvent::Unsupported,
        }
    }
}
