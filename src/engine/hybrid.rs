//! Weighted blend of content, collaborative and sentiment signals.

use serde::{Deserialize, Serialize};

use super::{collaborative, sentiment, similarity, CorpusSnapshot, ScoreAccumulator};
use crate::models::{Recommendation, UserRatings};

/// Blend weights of the hybrid ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridWeights {
    pub content: f64,
    pub collaborative: f64,
    pub sentiment: f64,
    /// Sentiment floor for a movie to reinforce a candidate
    pub min_sentiment: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            content: 0.4,
            collaborative: 0.3,
            sentiment: 0.3,
            min_sentiment: 0.2,
        }
    }
}

/// Blends the three strategies into one ranking.
///
/// Content and collaborative results (each over the top `2n`) add weighted
/// scores per title. Sentiment only reinforces titles already present; it
/// never introduces a candidate. With neither a seed nor ratings the result
/// is empty.
pub fn recommend(
    snapshot: &CorpusSnapshot,
    seed_title: Option<&str>,
    ratings: Option<&UserRatings>,
    n: usize,
    weights: &HybridWeights,
) -> Vec<Recommendation> {
    if n == 0 || snapshot.is_empty() {
        return Vec::new();
    }

    let pool = n.saturating_mul(2);
    let mut scores = ScoreAccumulator::default();

    if let Some(seed) = seed_title {
        for rec in similarity::recommend(snapshot, seed, pool) {
            scores.add(rec.id, &rec.title, weights.content * rec.score);
        }
    }

    if let Some(ratings) = ratings {
        for rec in collaborative::recommend(snapshot, ratings, pool) {
            scores.add(rec.id, &rec.title, weights.collaborative * rec.score);
        }
    }

    if !scores.is_empty() {
        for rec in sentiment::rank(snapshot.movies(), weights.min_sentiment, pool) {
            scores.boost(&rec.title, weights.sentiment * rec.sentiment);
        }
    }

    scores.into_ranked(n)
}
