//! Candidate filtering
//!
//! A pure function: no randomness, no I/O. Shuffling happens later, when
//! the cursor is seeded.

use super::session::Preferences;
use crate::places::Place;

/// Keeps a candidate only if it is rated at or above the minimum, is known
/// to be open now, and (for a restricted cuisine) one of the cuisine's
/// keywords appears in the lowercase concatenation of name and tags.
pub fn filter_candidates(candidates: &[Place], prefs: &Preferences) -> Vec<Place> {
    candidates
        .iter()
        .filter(|p| matches(p, prefs))
        .cloned()
        .collect()
}

fn matches(place: &Place, prefs: &Preferences) -> bool {
    let rated = place.rating.map_or(false, |r| r >= prefs.min_rating);
    let open = place.open_now == Some(true);

    let keywords = prefs.cuisine.keywords();
    let cuisine_ok = keywords.is_empty() || {
        let haystack = format!("{}{}", place.name, place.tags.join(",")).to_lowercase();
        keywords.iter().any(|k| haystack.contains(k))
    };

    rated && open && cuisine_ok
}
