use std::collections::HashSet;

use tokio::sync::RwLock;

use crate::{
    engine::RecommendationEngine,
    error::AppResult,
    models::{Movie, MovieList},
    services::providers::MetadataProvider,
};

/// Lists pulled into the catalog, in order
const CATALOG_LISTS: [MovieList; 2] = [MovieList::Popular, MovieList::TopRated];

/// Builds the recommendation corpus from the provider's curated lists.
///
/// For every page `1..=pages`, ids from the popular list then the top rated
/// list are collected, keeping the first occurrence of each. Full details are
/// then fetched in parallel. A list page that fails is logged and skipped.
pub async fn build_corpus(provider: &dyn MetadataProvider, pages: u32) -> AppResult<Vec<Movie>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for page in 1..=pages {
        for list in CATALOG_LISTS {
            match provider.list_movies(list, page).await {
                Ok(movies) => {
                    ids.extend(movies.into_iter().map(|m| m.id).filter(|id| seen.insert(*id)))
                }
                Err(e) => {
                    tracing::warn!(error = %e, list = %list, page = page, "Skipping catalog page")
                }
            }
        }
    }

    if ids.is_empty() {
        tracing::warn!(pages = pages, "No catalog candidates found");
        return Ok(Vec::new());
    }

    let movies = provider.movie_details_batch(ids).await?;
    tracing::info!(movies = movies.len(), pages = pages, "Catalog built");

    Ok(movies)
}

/// Rebuilds the catalog and swaps it into the engine. Returns the catalog size.
pub async fn refresh(
    provider: &dyn MetadataProvider,
    engine: &RwLock<RecommendationEngine>,
    pages: u32,
) -> AppResult<usize> {
    let corpus = build_corpus(provider, pages).await?;
    let count = corpus.len();
    engine.write().await.prepare(corpus);
    Ok(count)
}

/// Builds the catalog on first use
pub async fn ensure_catalog(
    provider: &dyn MetadataProvider,
    engine: &RwLock<RecommendationEngine>,
    pages: u32,
) -> AppResult<()> {
    if !engine.read().await.is_empty() {
        return Ok(());
    }

    let mut engine = engine.write().await;
    // Another request may have built it while we waited
    if engine.is_empty() {
        let corpus = build_corpus(provider, pages).await?;
        engine.prepare(corpus);
    }

    Ok(())
}
