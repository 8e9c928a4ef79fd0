//! Recommendation cursor
//!
//! Per-user record of a completed search: the full filtered candidate set
//! plus which candidates have already been shown. Candidates are shuffled
//! exactly once when the result is installed; `next_batch` then walks the
//! stored order, so repeat requests never re-show a place while unshown
//! alternates remain.

use crate::places::{Coordinate, Place};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// A completed search with shown-id bookkeeping.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub origin: Coordinate,
    candidates: Vec<Place>,
    shown: HashSet<String>,
}

impl SearchResult {
    /// Installs a fresh candidate set, uniformly shuffled. Resets all
    /// exhaustion history.
    pub fn new(origin: Coordinate, mut candidates: Vec<Place>, rng: &mut impl Rng) -> Self {
        candidates.shuffle(rng);
        Self {
            origin,
            candidates,
            shown: HashSet::new(),
        }
    }

    /// Returns up to `batch_size` not-yet-shown places in stored order and
    /// marks them shown. Empty once exhausted.
    pub fn next_batch(&mut self, batch_size: usize) -> Vec<Place> {
        let batch: Vec<Place> = self
            .candidates
            .iter()
            .filter(|p| !self.shown.contains(&p.id))
            .take(batch_size)
            .cloned()
            .collect();

        for place in &batch {
            self.shown.insert(place.id.clone());
        }

        batch
    }

    /// Candidates not yet shown.
    pub fn remaining(&self) -> usize {
        self.candidates.len() - self.shown.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn place(id: &str) -> Place {
        Place {
            id: id.to_string(),
            name: format!("店家 {id}"),
            coordinate: Coordinate { lat: 25.04, lng: 121.56 },
            rating: Some(4.0),
            open_now: Some(true),
            tags: vec!["restaurant".to_string()],
            vicinity: "台北市".to_string(),
            photo_ref: None,
        }
    }

    pub fn places(ids: &[&str]) -> Vec<Place> {
        ids.iter().map(|id| place(id)).collect()
    }
}
