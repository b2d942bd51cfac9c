//! Fuzzy resolution of user-typed titles against the catalog.
//!
//! Rules are tried in order and the first hit wins:
//! 1. case-insensitive exact title (confidence 1.0)
//! 2. exact match after normalization (confidence 1.0)
//! 3. normalized substring in either direction (confidence 0.9)
//! 4. best longest-common-subsequence ratio over all titles
//!
//! A match below [`MIN_CONFIDENCE`] is reported as not found.

use crate::models::Movie;

/// Lowest confidence at which a match is usable
pub const MIN_CONFIDENCE: f64 = 0.5;

const SUBSTRING_CONFIDENCE: f64 = 0.9;

/// Position of the matched movie within the corpus plus match confidence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleMatch {
    pub position: usize,
    pub confidence: f64,
}

/// Lowercases, drops everything but alphanumerics and whitespace, then
/// collapses whitespace. "Spider-Man: No Way Home" becomes
/// "spiderman no way home".
pub fn normalize(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Character-level similarity in [0, 1]: `2 * lcs(a, b) / (|a| + |b|)`.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    // Two-row LCS table
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for ca in &a {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    2.0 * previous[b.len()] as f64 / total as f64
}

/// Resolves `query` against the corpus.
///
/// Returns the best candidate with its confidence, even when the confidence
/// is below [`MIN_CONFIDENCE`]; use [`resolve_usable`] to apply the threshold.
pub fn resolve(query: &str, corpus: &[Movie]) -> Option<TitleMatch> {
    let query = query.trim();
    if query.is_empty() || corpus.is_empty() {
        return None;
    }

    let lowered = query.to_lowercase();
    if let Some(position) = corpus
        .iter()
        .position(|m| m.title.trim().to_lowercase() == lowered)
    {
        return Some(TitleMatch {
            position,
            confidence: 1.0,
        });
    }

    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        return None;
    }
    let normalized_titles: Vec<String> = corpus.iter().map(|m| normalize(&m.title)).collect();

    if let Some(position) = normalized_titles.iter().position(|t| *t == normalized_query) {
        return Some(TitleMatch {
            position,
            confidence: 1.0,
        });
    }

    if let Some(position) = normalized_titles.iter().position(|t| {
        !t.is_empty() && (t.contains(&normalized_query) || normalized_query.contains(t.as_str()))
    }) {
        return Some(TitleMatch {
            position,
            confidence: SUBSTRING_CONFIDENCE,
        });
    }

    let mut best: Option<TitleMatch> = None;
    for (position, title) in normalized_titles.iter().enumerate() {
        let confidence = similarity_ratio(&normalized_query, title);
        if best.map_or(true, |b| confidence > b.confidence) {
            best = Some(TitleMatch {
                position,
                confidence,
            });
        }
    }
    best
}

/// Like [`resolve`], but treats matches below [`MIN_CONFIDENCE`] as not found.
pub fn resolve_usable(query: &str, corpus: &[Movie]) -> Option<TitleMatch> {
    resolve(query, corpus).filter(|m| m.confidence >= MIN_CONFIDENCE)
}
