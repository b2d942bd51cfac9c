//! Rating-driven recommendations seeded from the user's liked movies.

use std::collections::HashSet;

use super::{resolver, similarity, CorpusSnapshot, ScoreAccumulator};
use crate::models::{Recommendation, UserRatings};

/// Ratings at or above this count as "liked"
pub const LIKED_THRESHOLD: f64 = 4.0;

/// Recommends movies similar to the ones the user liked.
///
/// Every liked title seeds a content-similarity run of up to `n` candidates;
/// a candidate keeps the best similarity it reached across all runs. Titles
/// the user already rated are never recommended. Empty ratings give an empty
/// list.
pub fn recommend(snapshot: &CorpusSnapshot, ratings: &UserRatings, n: usize) -> Vec<Recommendation> {
    if ratings.is_empty() || n == 0 {
        return Vec::new();
    }

    let rated: HashSet<String> = ratings.keys().map(|t| resolver::normalize(t)).collect();
    let mut scores = ScoreAccumulator::default();

    for (title, _) in ratings.iter().filter(|(_, r)| **r >= LIKED_THRESHOLD) {
        for candidate in similarity::recommend(snapshot, title, n) {
            if rated.contains(&resolver::normalize(&candidate.title)) {
                continue;
            }
            scores.raise(candidate.id, &candidate.title, candidate.score);
        }
    }

    scores.into_ranked(n)
}
