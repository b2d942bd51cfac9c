//! Content similarity ranking and the cruder keyword-overlap fallback.

use std::collections::HashSet;

use super::{resolver, CorpusSnapshot};
use crate::models::{Movie, Recommendation};

/// Weight per query token shared with a candidate title
const TITLE_TOKEN_WEIGHT: f64 = 0.3;

/// Weight per long query token found in a candidate overview
const OVERVIEW_TOKEN_WEIGHT: f64 = 0.1;

/// Query tokens shorter than this are not looked up in overviews
const MIN_OVERVIEW_TOKEN_CHARS: usize = 4;

/// Candidates at least this similar to the query are the query itself
const SAME_TITLE_RATIO: f64 = 0.9;

/// Ranks the catalog by cosine similarity to the movie `seed_title` resolves to.
///
/// The seed itself is never returned. Ties keep catalog order. An unresolvable
/// seed, an empty catalog or `n == 0` all yield an empty list.
pub fn recommend(snapshot: &CorpusSnapshot, seed_title: &str, n: usize) -> Vec<Recommendation> {
    if n == 0 || snapshot.is_empty() {
        return Vec::new();
    }

    let Some(seed) = resolver::resolve_usable(seed_title, snapshot.movies()) else {
        return Vec::new();
    };

    let mut scored: Vec<(usize, f64)> = snapshot
        .index()
        .similarities(seed.position)
        .into_iter()
        .enumerate()
        .filter(|(position, _)| *position != seed.position)
        .collect();

    // Stable: equal scores keep catalog order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(n)
        .map(|(position, score)| {
            let movie = &snapshot.movies()[position];
            Recommendation {
                id: movie.id,
                title: movie.title.clone(),
                score,
            }
        })
        .collect()
}

/// Scores candidates by token overlap with the query.
///
/// Each normalized query token shared with the candidate title adds 0.3 and
/// each query token of four or more characters appearing in the candidate
/// overview adds 0.1. Zero scores are dropped, as is any candidate whose
/// title is effectively the query itself.
pub fn keyword_matches(query: &str, corpus: &[Movie], n: usize) -> Vec<Recommendation> {
    if n == 0 {
        return Vec::new();
    }

    let normalized_query = resolver::normalize(query);
    let query_tokens: Vec<&str> = {
        let mut seen = HashSet::new();
        normalized_query
            .split_whitespace()
            .filter(|t| seen.insert(*t))
            .collect()
    };
    if query_tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<Recommendation> = corpus
        .iter()
        .filter_map(|movie| {
            let normalized_title = resolver::normalize(&movie.title);
            if resolver::similarity_ratio(&normalized_query, &normalized_title) >= SAME_TITLE_RATIO
            {
                return None;
            }

            let title_tokens: HashSet<&str> = normalized_title.split_whitespace().collect();
            let overview = movie.overview_text().to_lowercase();

            let shared = query_tokens
                .iter()
                .filter(|t| title_tokens.contains(*t))
                .count();
            let in_overview = query_tokens
                .iter()
                .filter(|t| t.chars().count() >= MIN_OVERVIEW_TOKEN_CHARS && overview.contains(*t))
                .count();

            let score =
                TITLE_TOKEN_WEIGHT * shared as f64 + OVERVIEW_TOKEN_WEIGHT * in_overview as f64;
            (score > 0.0).then(|| Recommendation {
                id: movie.id,
                title: movie.title.clone(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(n);
    scored
}
