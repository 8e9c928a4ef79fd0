//! Property-based tests for the recommendation cursor

use super::cursor::SearchResult;
use crate::places::{Coordinate, Place};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn place(id: String) -> Place {
    Place {
        name: format!("店家 {id}"),
        id,
        coordinate: Coordinate { lat: 25.04, lng: 121.56 },
        rating: Some(4.0),
        open_now: Some(true),
        tags: vec!["restaurant".to_string()],
        vicinity: "台北市".to_string(),
        photo_ref: None,
    }
}

fn candidate_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,8}", 0..40).prop_map(|set| set.into_iter().collect())
}

proptest! {
    /// Repeated batches cover every candidate exactly once.
    #[test]
    fn batches_partition_the_candidate_set(
        ids in candidate_ids(),
        rng_seed in any::<u64>(),
        batch_size in 1usize..6,
    ) {
        let origin = Coordinate { lat: 25.04, lng: 121.56 };
        let candidates: Vec<Place> = ids.iter().cloned().map(place).collect();
        let mut result = SearchResult::new(
            origin,
            candidates,
            &mut StdRng::seed_from_u64(rng_seed),
        );

        let mut seen: HashSet<String> = HashSet::new();
        loop {
            let batch = result.next_batch(batch_size);
            if batch.is_empty() {
                break;
            }
            prop_assert!(batch.len() <= batch_size);
            for p in batch {
                prop_assert!(seen.insert(p.id), "a place was returned twice");
            }
        }

        let expected: HashSet<String> = ids.into_iter().collect();
        prop_assert_eq!(seen, expected);
        prop_assert!(result.is_exhausted());
    }

    /// Once exhausted, the cursor stays empty no matter how often it is asked.
    #[test]
    fn exhaustion_is_stable(
        ids in candidate_ids(),
        rng_seed in any::<u64>(),
        extra_calls in 1usize..10,
    ) {
        let origin = Coordinate { lat: 25.04, lng: 121.56 };
        let candidates: Vec<Place> = ids.iter().cloned().map(place).collect();
        let mut result = SearchResult::new(
            origin,
            candidates,
            &mut StdRng::seed_from_u64(rng_seed),
        );

        while !result.next_batch(3).is_empty() {}

        for _ in 0..extra_calls {
            prop_assert!(result.next_batch(3).is_empty());
            prop_assert_eq!(result.remaining(), 0);
        }
    }

    /// The shuffle only permutes; it never invents or drops candidates.
    #[test]
    fn seeding_preserves_the_candidate_multiset(
        ids in candidate_ids(),
        rng_seed in any::<u64>(),
    ) {
        let origin = Coordinate { lat: 25.04, lng: 121.56 };
        let candidates: Vec<Place> = ids.iter().cloned().map(place).collect();
        let mut result = SearchResult::new(
            origin,
            candidates,
            &mut StdRng::seed_from_u64(rng_seed),
        );

        prop_assert_eq!(result.remaining(), ids.len());
        let all = result.next_batch(ids.len().max(1));
        let returned: HashSet<String> = all.into_iter().map(|p| p.id).collect();
        let expected: HashSet<String> = ids.into_iter().collect();
        prop_assert_eq!(returned, expected);
    }
}
