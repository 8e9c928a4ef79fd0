//! Response rendering
//!
//! Turns the engine's response descriptors into LINE message JSON: flex
//! carousels for place batches, location messages for navigation, plain
//! text otherwise.

use crate::engine::{prompts, Response};
use crate::places::Place;
use serde_json::{json, Value};

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/400x300?text=No+Image";

/// Stateless renderer; the key is only needed to build photo URLs.
#[derive(Clone)]
pub struct Renderer {
    google_api_key: String,
}

impl Renderer {
    pub fn new(google_api_key: String) -> Self {
        Self { google_api_key }
    }

    pub fn render(&self, response: &Response) -> Vec<Value> {
        match response {
            Response::Text(text) => vec![self.render_text(text)],
            Response::Places { places, more_available } => {
                vec![self.render_places(places, *more_available)]
            }
            Response::Exhausted => vec![json!({
                "type": "text",
                "text": "附近的推薦都看完囉 😋 換個位置或條件再找找吧！"
            })],
            Response::Navigation { name, address, coordinate } => vec![json!({
                "type": "location",
                "title": name,
                "address": address,
                "latitude": coordinate.lat,
                "longitude": coordinate.lng
            })],
        }
    }

    fn render_text(&self, text: &str) -> Value {
        let mut message = json!({ "type": "text", "text": text });
        // The welcome prompt carries a quick-start button.
        if text == prompts::WELCOME {
            message["quickReply"] = json!({
                "items": [{
                    "type": "action",
                    "action": {
                        "type": "message",
                        "label": "我要找餐廳 🍽️",
                        "text": "開始找餐廳"
                    }
                }]
            });
        }
        message
    }

    fn render_places(&self, places: &[Place], more_available: bool) -> Value {
        let bubbles: Vec<Value> = places.iter().map(|p| self.render_bubble(p)).collect();

        let mut message = json!({
            "type": "flex",
            "altText": "附近美食推薦",
            "contents": {
                "type": "carousel",
                "contents": bubbles
            }
        });

        if more_available {
            message["quickReply"] = json!({
                "items": [{
                    "type": "action",
                    "action": {
                        "type": "postback",
                        "label": "再推薦 3 家 🔄",
                        "data": "{\"action\":\"recommend\"}"
                    }
                }]
            });
        }

        message
    }

    fn render_bubble(&self, place: &Place) -> Value {
        let image = place.photo_ref.as_ref().map_or_else(
            || PLACEHOLDER_IMAGE.to_string(),
            |r| {
                format!(
                    "https://maps.googleapis.com/maps/api/place/photo?maxwidth=400&photoreference={r}&key={}",
                    self.google_api_key
                )
            },
        );

        let rating = place
            .rating
            .map_or_else(|| "無評分".to_string(), |r| format!("⭐ {r} 分"));

        let navigate = json!({
            "action": "navigate",
            "name": place.name,
            "address": place.vicinity,
            "latitude": place.coordinate.lat,
            "longitude": place.coordinate.lng
        });

        json!({
            "type": "bubble",
            "hero": {
                "type": "image",
                "url": image,
                "size": "full",
                "aspectRatio": "20:13",
                "aspectMode": "cover"
            },
            "body": {
                "type": "box",
                "layout": "vertical",
                "contents": [
                    { "type": "text", "text": place.name, "weight": "bold", "size": "lg", "wrap": true },
                    { "type": "text", "text": format!("📍 {}", place.vicinity), "size": "sm", "color": "#666666", "wrap": true },
                    { "type": "text", "text": rating, "size": "sm", "color": "#999999", "wrap": true }
                ]
            },
            "footer": {
                "type": "box",
                "layout": "vertical",
                "contents": [{
                    "type": "button",
                    "style": "primary",
                    "action": {
                        "type": "postback",
                        "label": "吃這家",
                        "data": navigate.to_string()
                    }
                }]
            }
        })
    }
}
