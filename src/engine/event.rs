//! Inbound events, already authenticated and decoded by the transport

use crate::places::Coordinate;
use serde::Deserialize;

/// One inbound event from the messaging transport.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// A shared location pin.
    Location { coordinate: Coordinate },
    /// Free text.
    Text { text: String },
    /// A structured postback action from a rich card.
    Action(ActionPayload),
    /// Stickers, images, anything else. Answered with a fixed prompt and
    /// never mutates session state.
    Unsupported,
}

/// Payload of a structured action, tagged by its required `action` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ActionPayload {
    /// Hand the user off to navigation for a previously shown place.
    Navigate {
        name: String,
        address: String,
        latitude: f64,
        longitude: f64,
    },
    /// "Show me more" re-roll on the current search.
    Recommend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_payload_decodes_navigate() {
        let payload: ActionPayload = serde_json::from_str(
            r#"{"action":"navigate","name":"好吃拉麵","address":"台北市","latitude":25.0,"longitude":121.5}"#,
        )
        .unwrap();
        assert!(matches!(payload, ActionPayload::Navigate { .. }));
    }

    #[test]
    fn action_payload_decodes_recommend() {
        let payload: ActionPayload = serde_json::from_str(r#"{"action":"recommend"}"#).unwrap();
        assert_eq!(payload, ActionPayload::Recommend);
    }

    #[test]
    fn action_payload_rejects_unknown_action() {
        assert!(serde_json::from_str::<ActionPayload>(r#"{"action":"order"}"#).is_err());
        assert!(serde_json::from_str::<ActionPayload>(r#"{"foo":1}"#).is_err());
    }
}
