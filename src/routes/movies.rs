use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    engine::RecommendationEngine,
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Movie, MovieId, MovieList, ResolvedTitle, SentimentReport},
    services::{
        catalog,
        comparison::{self, MovieComparison},
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    page: u32,
}

fn first_page() -> u32 {
    1
}

/// Bounds on how many movies one comparison takes
const MIN_COMPARED: usize = 2;
const MAX_COMPARED: usize = 10;

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// Comma separated movie ids
    ids: String,
}

/// Parses the id list, dropping repeats and keeping first-seen order
fn parse_compare_ids(raw: &str) -> AppResult<Vec<MovieId>> {
    let mut ids: Vec<MovieId> = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = part
            .parse::<u64>()
            .map(MovieId)
            .map_err(|_| AppError::InvalidInput(format!("Invalid movie id '{}'", part)))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if !(MIN_COMPARED..=MAX_COMPARED).contains(&ids.len()) {
        return Err(AppError::InvalidInput(format!(
            "Compare between {} and {} distinct movies",
            MIN_COMPARED, MAX_COMPARED
        )));
    }
    Ok(ids)
}

/// Catalog copy when present, provider details otherwise
pub(crate) async fn find_movie(state: &AppState, id: MovieId) -> AppResult<Movie> {
    let known = state.engine.read().await.snapshot().movie(id).cloned();
    match known {
        Some(movie) => Ok(movie),
        None => state.provider.movie_details(id).await,
    }
}

/// Handler for movie search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    tracing::info!(request_id = %request_id, query = %params.q, "Movie search request");
    let movies = state.provider.search_movies(&params.q).await?;
    Ok(Json(movies))
}

pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<Movie>> {
    Ok(Json(find_movie(&state, id).await?))
}

/// Sentiment breakdown of one movie's overview and reviews
pub async fn sentiment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<SentimentReport>> {
    let movie = find_movie(&state, id).await?;
    Ok(Json(RecommendationEngine::sentiment_report(&movie)))
}

/// Side-by-side comparison of the given movies
pub async fn compare(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareQuery>,
) -> AppResult<Json<MovieComparison>> {
    let ids = parse_compare_ids(&params.ids)?;

    let mut movies = Vec::with_capacity(ids.len());
    for id in ids {
        movies.push(find_movie(&state, id).await?);
    }
    Ok(Json(comparison::compare(&movies)))
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(list): Path<MovieList>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = state.provider.list_movies(list, params.page).await?;
    Ok(Json(movies))
}

/// Resolves a typed title against the catalog
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<ResolvedTitle>> {
    catalog::ensure_catalog(state.provider.as_ref(), &state.engine, state.catalog_pages).await?;

    state
        .engine
        .read()
        .await
        .resolve_title(&params.q)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No catalog movie matches '{}'", params.q)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compare_ids() {
        let ids = parse_compare_ids(" 603, 27205,603 ").unwrap();
        assert_eq!(ids, vec![MovieId(603), MovieId(27205)]);
    }

    #[test]
    fn test_parse_compare_ids_rejects_bad_input() {
        assert!(matches!(parse_compare_ids("603"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_compare_ids("603,603"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_compare_ids("603,abc"), Err(AppError::InvalidInput(_))));
        assert!(matches!(parse_compare_ids(""), Err(AppError::InvalidInput(_))));

        let many: Vec<String> = (1..=11).map(|i| i.to_string()).collect();
        assert!(matches!(parse_compare_ids(&many.join(",")), Err(AppError::InvalidInput(_))));
    }
}
