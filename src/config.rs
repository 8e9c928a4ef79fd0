//! Runtime configuration and engine constants.
//!
//! The numeric defaults below are part of the contract with the place
//! source query layer, not tunables hidden inside the engine.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Places shown per batch. Fixed system-wide so the rich-card renderer
/// always deals with at most this many bubbles.
pub const BATCH_SIZE: usize = 3;

/// Default minimum rating for the guided preference flow.
pub const DEFAULT_MIN_RATING: f32 = 3.0;

/// Default search radius for the guided preference flow, in meters.
pub const DEFAULT_RADIUS_M: u32 = 2000;

/// Minimum rating applied when a location arrives with no open dialog.
pub const IMMEDIATE_MIN_RATING: f32 = 3.5;

/// Accepted rating inputs; anything outside falls back to the default.
pub const RATING_RANGE: RangeInclusive<f32> = 1.0..=5.0;

/// Accepted radius inputs in meters; anything outside falls back.
pub const RADIUS_RANGE_M: RangeInclusive<u32> = 300..=5000;

/// Category passed to the place source on every nearby search.
pub const PLACE_CATEGORY: &str = "restaurant";

/// Failed geocode attempts before the guided flow gives up.
pub const MAX_GEOCODE_ATTEMPTS: u8 = 3;

/// Phrase that starts the guided flow, matched by containment.
pub const TRIGGER_PHRASE: &str = "開始找餐廳";

/// Keywords that get a "send your location" hint instead of a geocode
/// attempt, matched by containment on idle text.
pub const HINT_KEYWORDS: &[&str] = &["推薦", "附近", "美食"];

/// Process configuration read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub google_api_key: String,
    pub line_channel_token: String,
    /// Upper bound on any single place-source or reply call.
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let request_timeout = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map_or(Duration::from_secs(10), Duration::from_secs);

        Self {
            port,
            google_api_key: std::env::var("GOOGLE_MAPS_API_KEY").unwrap_or_default(),
            line_channel_token: std::env::var("LINE_CHANNEL_ACCESS_TOKEN").unwrap_or_default(),
            request_timeout,
        }
    }
}
