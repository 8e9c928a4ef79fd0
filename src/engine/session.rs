//! Dialog session state types

use crate::config;
use serde::{Deserialize, Serialize};

/// Opaque per-user identifier assigned by the messaging transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed cuisine enumeration. `Any` is the unrestricted fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    Chinese,
    Japanese,
    Western,
    Korean,
    Taiwanese,
    #[default]
    Any,
}

impl Cuisine {
    /// Exact match against the user-facing labels; anything else is `Any`.
    pub fn from_input(text: &str) -> Self {
        match text.trim() {
            "中式" => Cuisine::Chinese,
            "日式" => Cuisine::Japanese,
            "西式" => Cuisine::Western,
            "韓式" => Cuisine::Korean,
            "台式" => Cuisine::Taiwanese,
            _ => Cuisine::Any,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Cuisine::Chinese => "中式",
            Cuisine::Japanese => "日式",
            Cuisine::Western => "西式",
            Cuisine::Korean => "韓式",
            Cuisine::Taiwanese => "台式",
            Cuisine::Any => "不限",
        }
    }

    /// Lowercase keywords matched against a place's name and tags.
    /// Empty for `Any`, which matches everything.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Cuisine::Chinese => &["chinese"],
            Cuisine::Japanese => &["japanese"],
            Cuisine::Western => &["western", "american", "european"],
            Cuisine::Korean => &["korean"],
            Cuisine::Taiwanese => &["taiwanese"],
            Cuisine::Any => &[],
        }
    }
}

/// Search preferences accumulated by the guided flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub cuisine: Cuisine,
    pub min_rating: f32,
    pub radius_m: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            cuisine: Cuisine::Any,
            min_rating: config::DEFAULT_MIN_RATING,
            radius_m: config::DEFAULT_RADIUS_M,
        }
    }
}

impl Preferences {
    /// Preferences for the no-dialog path: a location arrives with no
    /// session open.
    pub fn immediate() -> Self {
        Self {
            cuisine: Cuisine::Any,
            min_rating: config::IMMEDIATE_MIN_RATING,
            radius_m: config::DEFAULT_RADIUS_M,
        }
    }
}

/// Parse a rating reply; out-of-range or non-numeric input falls back to
/// the default, never an error.
pub(crate) fn parse_rating(text: &str) -> f32 {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|r| config::RATING_RANGE.contains(r))
        .unwrap_or(config::DEFAULT_MIN_RATING)
}

/// Parse a radius reply in meters, with the same silent fallback.
pub(crate) fn parse_radius(text: &str) -> u32 {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|r| config::RADIUS_RANGE_M.contains(r))
        .unwrap_or(config::DEFAULT_RADIUS_M)
}

/// Where the guided flow currently is.
///
/// Idle is a first-class variant: "no stored session" normalizes to an
/// idle session before dispatch, so routing never branches on record
/// presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogStep {
    #[default]
    Idle,
    AwaitingCuisine,
    AwaitingRating,
    AwaitingRadius,
    AwaitingLocation,
}

/// Per-user record of progress through the preference-gathering dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DialogSession {
    pub step: DialogStep,
    pub prefs: Preferences,
    /// Failed geocode attempts in `AwaitingLocation`; the flow gives up at
    /// `config::MAX_GEOCODE_ATTEMPTS`.
    pub geocode_attempts: u8,
}

impl DialogSession {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Fresh session at the start of the guided flow.
    pub fn starting() -> Self {
        Self {
            step: DialogStep::AwaitingCuisine,
            prefs: Preferences::default(),
            geocode_attempts: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.step == DialogStep::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuisine_exact_match_only() {
        assert_eq!(Cuisine::from_input("日式"), Cuisine::Japanese);
        assert_eq!(Cuisine::from_input(" 台式 "), Cuisine::Taiwanese);
        assert_eq!(Cuisine::from_input("日式料理"), Cuisine::Any);
        assert_eq!(Cuisine::from_input("義式"), Cuisine::Any);
        assert_eq!(Cuisine::from_input("不限"), Cuisine::Any);
    }

    #[test]
    fn rating_falls_back_outside_range() {
        assert!((parse_rating("4.5") - 4.5).abs() < f32::EPSILON);
        assert!((parse_rating("1") - 1.0).abs() < f32::EPSILON);
        assert!((parse_rating("9") - 3.0).abs() < f32::EPSILON);
        assert!((parse_rating("0.5") - 3.0).abs() < f32::EPSILON);
        assert!((parse_rating("abc") - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn radius_falls_back_outside_range() {
        assert_eq!(parse_radius("500"), 500);
        assert_eq!(parse_radius("5000"), 5000);
        assert_eq!(parse_radius("100"), 2000);
        assert_eq!(parse_radius("99999"), 2000);
        assert_eq!(parse_radius("abc"), 2000);
        assert_eq!(parse_radius("-100"), 2000);
    }

    #[test]
    fn immediate_preferences_use_stricter_rating() {
        let prefs = Preferences::immediate();
        assert!((prefs.min_rating - 3.5).abs() < f32::EPSILON);
        assert_eq!(prefs.radius_m, 2000);
        assert_eq!(prefs.cuisine, Cuisine::Any);
    }
}
