//! Recommendation core.
//!
//! Everything in here is synchronous and free of I/O. The engine owns an
//! immutable [`CorpusSnapshot`] (movies + TF-IDF index); `prepare` builds a
//! complete new snapshot and swaps it in, so readers never observe a
//! half-built index.

use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{
    Movie, MovieId, Recommendation, ResolvedTitle, SentimentRecommendation, SentimentReport,
    UserRatings,
};

pub mod collaborative;
pub mod features;
pub mod hybrid;
pub mod resolver;
pub mod sentiment;
pub mod similarity;
pub mod text_index;
pub mod tokenizer;

pub use hybrid::HybridWeights;
pub use text_index::{SparseVector, TextIndex};

/// Immutable catalog state: the movies and their feature index, row-aligned
#[derive(Debug, Clone, Default)]
pub struct CorpusSnapshot {
    movies: Vec<Movie>,
    index: TextIndex,
}

impl CorpusSnapshot {
    /// Composes features for every movie and indexes them
    pub fn build(movies: Vec<Movie>) -> Self {
        Self::build_with_max_features(movies, text_index::DEFAULT_MAX_FEATURES)
    }

    pub fn build_with_max_features(movies: Vec<Movie>, max_features: usize) -> Self {
        let documents: Vec<String> = movies.iter().map(features::compose).collect();
        let index = TextIndex::build_with_max_features(&documents, max_features);
        Self { movies, index }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn index(&self) -> &TextIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Looks up a movie by id
    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }
}

/// Per-title score accumulator that remembers first-seen order for stable ties
#[derive(Debug, Default)]
pub(crate) struct ScoreAccumulator {
    entries: Vec<Recommendation>,
    slots: HashMap<String, usize>,
}

impl ScoreAccumulator {
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn slot(&mut self, id: MovieId, title: &str) -> &mut Recommendation {
        let next = self.entries.len();
        let index = *self.slots.entry(title.to_string()).or_insert(next);
        if index == next {
            self.entries.push(Recommendation {
                id,
                title: title.to_string(),
                score: 0.0,
            });
        }
        &mut self.entries[index]
    }

    /// Adds `delta` to the title's score, inserting it at zero if new
    pub(crate) fn add(&mut self, id: MovieId, title: &str, delta: f64) {
        self.slot(id, title).score += delta;
    }

    /// Keeps the larger of the current and the given score
    pub(crate) fn raise(&mut self, id: MovieId, title: &str, score: f64) {
        let is_new = !self.slots.contains_key(title);
        let entry = self.slot(id, title);
        if is_new || score > entry.score {
            entry.score = score;
        }
    }

    /// Adds `delta` only if the title is already present
    pub(crate) fn boost(&mut self, title: &str, delta: f64) -> bool {
        match self.slots.get(title) {
            Some(&index) => {
                self.entries[index].score += delta;
                true
            }
            None => false,
        }
    }

    /// Entries sorted by score descending (ties in insertion order), at most `n`
    pub(crate) fn into_ranked(self, n: usize) -> Vec<Recommendation> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        entries.truncate(n);
        entries
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub max_features: usize,
    pub hybrid: HybridWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_features: text_index::DEFAULT_MAX_FEATURES,
            hybrid: HybridWeights::default(),
        }
    }
}

/// Entry point of the recommendation core.
///
/// Every query before the first `prepare`, or after preparing an empty
/// catalog, returns an empty result.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    snapshot: Arc<CorpusSnapshot>,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            snapshot: Arc::new(CorpusSnapshot::default()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rebuilds the catalog and its index from scratch.
    pub fn prepare(&mut self, corpus: Vec<Movie>) {
        let snapshot = CorpusSnapshot::build_with_max_features(corpus, self.config.max_features);

        tracing::debug!(
            movies = snapshot.len(),
            terms = snapshot.index().vocabulary_size(),
            "Text index rebuilt"
        );

        self.snapshot = Arc::new(snapshot);
    }

    /// Current snapshot; stays valid even if the engine is re-prepared
    pub fn snapshot(&self) -> Arc<CorpusSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn movies(&self) -> &[Movie] {
        self.snapshot.movies()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Resolves a typed title to a catalog movie, `None` below the confidence floor
    pub fn resolve_title(&self, query: &str) -> Option<ResolvedTitle> {
        let found = resolver::resolve_usable(query, self.snapshot.movies())?;
        let movie = &self.snapshot.movies()[found.position];
        Some(ResolvedTitle {
            id: movie.id,
            title: movie.title.clone(),
            confidence: found.confidence,
        })
    }

    /// Movies most similar in content to the seed title
    pub fn recommend_by_title(&self, seed_title: &str, n: usize) -> Vec<Recommendation> {
        similarity::recommend(&self.snapshot, seed_title, n)
    }

    /// Keyword-overlap fallback for seeds that don't resolve
    pub fn recommend_by_keywords(&self, seed_title: &str, n: usize) -> Vec<Recommendation> {
        similarity::keyword_matches(seed_title, self.snapshot.movies(), n)
    }

    /// Most positively received movies of the catalog
    pub fn recommend_by_sentiment(
        &self,
        min_sentiment: f64,
        n: usize,
    ) -> Vec<SentimentRecommendation> {
        sentiment::rank(self.snapshot.movies(), min_sentiment, n)
    }

    /// Movies similar to the ones the user rated highly
    pub fn recommend_collaborative(&self, ratings: &UserRatings, n: usize) -> Vec<Recommendation> {
        collaborative::recommend(&self.snapshot, ratings, n)
    }

    /// Weighted blend of the content, collaborative and sentiment rankings
    pub fn recommend_hybrid(
        &self,
        seed_title: Option<&str>,
        ratings: Option<&UserRatings>,
        n: usize,
    ) -> Vec<Recommendation> {
        hybrid::recommend(&self.snapshot, seed_title, ratings, n, &self.config.hybrid)
    }

    /// Sentiment breakdown of a single movie
    pub fn sentiment_report(movie: &Movie) -> SentimentReport {
        sentiment::score(movie)
    }
}
