//! Recommendation flows around the engine: seed lookup, catalog
//! augmentation through the metadata provider, and keyword fallback.

use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
    engine::RecommendationEngine,
    models::{Recommendation, ResolvedTitle, Strategy, UserRatings},
    services::providers::MetadataProvider,
};

/// Similar-movie results together with how they were produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecommendations {
    pub strategy: Strategy,
    /// Catalog movie the seed resolved to, if any
    pub seed: Option<ResolvedTitle>,
    pub results: Vec<Recommendation>,
}

/// Looks the title up with the provider and adds the best hit to the catalog.
///
/// Returns the provider's canonical title for the hit. Provider failures are
/// logged and yield `None`.
pub async fn augment_catalog(
    provider: &dyn MetadataProvider,
    engine: &RwLock<RecommendationEngine>,
    title: &str,
) -> Option<String> {
    let hit = match provider.search_movies(title).await {
        Ok(hits) => hits.into_iter().next()?,
        Err(e) => {
            tracing::warn!(error = %e, title = %title, "Seed search failed");
            return None;
        }
    };

    let movie = match provider.movie_details(hit.id).await {
        Ok(movie) => movie,
        Err(e) => {
            tracing::warn!(error = %e, movie_id = %hit.id, "Seed details fetch failed");
            return None;
        }
    };
    let canonical = movie.title.clone();

    let mut engine = engine.write().await;
    if !engine.movies().iter().any(|m| m.id == movie.id) {
        let mut corpus = engine.movies().to_vec();
        corpus.push(movie);
        engine.prepare(corpus);
        tracing::info!(title = %canonical, catalog = engine.movies().len(), "Seed added to catalog");
    }

    Some(canonical)
}

/// Resolves a seed title, pulling it into the catalog when it isn't there yet
async fn resolve_seed(
    provider: &dyn MetadataProvider,
    engine: &RwLock<RecommendationEngine>,
    title: &str,
) -> Option<ResolvedTitle> {
    let resolved = engine.read().await.resolve_title(title);
    if resolved.is_some() {
        return resolved;
    }

    let canonical = augment_catalog(provider, engine, title).await?;
    engine.read().await.resolve_title(&canonical)
}

/// Movies similar to `title`.
///
/// Content similarity is tried first, after augmenting the catalog if the
/// seed is unknown. When that yields nothing the keyword-overlap ranking over
/// the raw query is returned instead.
pub async fn similar_movies(
    provider: &dyn MetadataProvider,
    engine: &RwLock<RecommendationEngine>,
    title: &str,
    n: usize,
) -> ContentRecommendations {
    let seed = resolve_seed(provider, engine, title).await;

    if let Some(seed) = &seed {
        let results = engine.read().await.recommend_by_title(&seed.title, n);
        if !results.is_empty() {
            tracing::info!(
                seed = %seed.title,
                confidence = seed.confidence,
                results = results.len(),
                "Content recommendations"
            );
            return ContentRecommendations {
                strategy: Strategy::Content,
                seed: Some(seed.clone()),
                results,
            };
        }
    }

    let results = engine.read().await.recommend_by_keywords(title, n);
    tracing::info!(
        query = %title,
        results = results.len(),
        "Falling back to keyword recommendations"
    );

    ContentRecommendations {
        strategy: Strategy::Keyword,
        seed,
        results,
    }
}

/// Hybrid recommendations; an unknown seed title is augmented first
pub async fn hybrid_movies(
    provider: &dyn MetadataProvider,
    engine: &RwLock<RecommendationEngine>,
    title: Option<&str>,
    ratings: Option<&UserRatings>,
    n: usize,
) -> Vec<Recommendation> {
    let seed = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => resolve_seed(provider, engine, title)
            .await
            .map(|s| s.title)
            .or_else(|| Some(title.to_string())),
        None => None,
    };

    engine
        .read()
        .await
        .recommend_hybrid(seed.as_deref(), ratings, n)
}
