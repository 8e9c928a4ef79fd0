//! Place and coordinate types

use serde::{Deserialize, Serialize};

/// A WGS84 point. Construction validates finiteness and range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Returns `None` for non-finite or out-of-range values.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() && (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

/// A candidate place as returned by the place source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Stable identifier, unique within one search result.
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    /// 0–5, absent when the provider has no rating.
    pub rating: Option<f32>,
    /// Absent when opening hours are unknown.
    pub open_now: Option<bool>,
    /// Category tags from the provider, e.g. "restaurant", "japanese".
    pub tags: Vec<String>,
    /// Human-readable address fragment.
    pub vicinity: String,
    /// Provider photo reference for the card renderer; the engine ignores it.
    pub photo_ref: Option<String>,
}
