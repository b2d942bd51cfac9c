//! Sparse TF-IDF index over composed movie features.
//!
//! Weighting follows the usual smoothed scheme: `idf = ln((1 + n) / (1 + df)) + 1`,
//! raw term counts as TF, and every row L2-normalized so that cosine similarity
//! is a plain dot product.

use std::collections::{HashMap, HashSet};

use super::tokenizer;

/// Default cap on the retained vocabulary
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Sparse row: `(term id, weight)` pairs sorted by term id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: HashMap<usize, f64>, idf: &[f64]) -> Self {
        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(term, tf)| (term, tf * idf[term]))
            .collect();
        entries.sort_unstable_by_key(|(term, _)| *term);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        }

        Self { entries }
    }

    /// Number of non-zero terms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of a term id, zero when absent
    pub fn weight(&self, term: usize) -> f64 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Dot product via merge of the two sorted rows
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    /// Cosine similarity of two L2-normalized rows, clamped to [-1, 1].
    /// Zero rows are similar to nothing.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }
        self.dot(other).clamp(-1.0, 1.0)
    }
}

/// TF-IDF matrix: one sparse row per document, same order as the input
#[derive(Debug, Clone, Default)]
pub struct TextIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl TextIndex {
    /// Builds the index with the default vocabulary cap
    pub fn build<S: AsRef<str>>(documents: &[S]) -> Self {
        Self::build_with_max_features(documents, DEFAULT_MAX_FEATURES)
    }

    /// Builds the index keeping at most `max_features` terms.
    ///
    /// When the vocabulary is larger than the cap, the terms with the highest
    /// corpus-wide frequency are kept (ties broken alphabetically).
    pub fn build_with_max_features<S: AsRef<str>>(documents: &[S], max_features: usize) -> Self {
        if documents.is_empty() {
            return Self::default();
        }

        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|d| tokenizer::terms(d.as_ref()))
            .collect();

        let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();

        for terms in &tokenized {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in terms {
                *corpus_freq.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut kept: Vec<(&str, usize)> = corpus_freq.into_iter().collect();
        if kept.len() > max_features {
            kept.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            kept.truncate(max_features);
        }

        // Term ids follow alphabetical order so rebuilds are reproducible
        let mut terms: Vec<&str> = kept.into_iter().map(|(t, _)| t).collect();
        terms.sort_unstable();

        let n = documents.len() as f64;
        let idf: Vec<f64> = terms
            .iter()
            .map(|t| {
                let df = doc_freq.get(t).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(id, t)| (t.to_string(), id))
            .collect();

        let rows = tokenized
            .iter()
            .map(|terms| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for term in terms {
                    if let Some(&id) = vocabulary.get(term) {
                        *counts.entry(id).or_insert(0.0) += 1.0;
                    }
                }
                SparseVector::from_counts(counts, &idf)
            })
            .collect();

        Self {
            vocabulary,
            idf,
            rows,
        }
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Size of the retained vocabulary
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Row for the document at `position`
    pub fn row(&self, position: usize) -> Option<&SparseVector> {
        self.rows.get(position)
    }

    /// Term id of a retained term
    pub fn term_id(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a retained term
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_id(term).map(|id| self.idf[id])
    }

    /// Cosine similarity of the row at `position` against every row, in order.
    /// Out-of-range positions yield an empty vector.
    pub fn similarities(&self, position: usize) -> Vec<f64> {
        match self.rows.get(position) {
            Some(query) => self.rows.iter().map(|row| query.cosine(row)).collect(),
            None => Vec::new(),
        }
    }
}
