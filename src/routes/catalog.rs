use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::Movie,
    services::{catalog, filters::MovieFilter},
    state::AppState,
};

/// Catalog filter query; list values are comma separated
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    min_year: Option<i32>,
    max_year: Option<i32>,
    decade: Option<i32>,
    min_rating: Option<f64>,
    max_rating: Option<f64>,
    min_votes: Option<u32>,
    min_runtime: Option<u32>,
    max_runtime: Option<u32>,
    languages: Option<String>,
    genre_ids: Option<String>,
    genres: Option<String>,
    actors: Option<String>,
    director: Option<String>,
    min_popularity: Option<f64>,
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl TryFrom<CatalogQuery> for MovieFilter {
    type Error = AppError;

    fn try_from(query: CatalogQuery) -> AppResult<Self> {
        let genre_ids = split_list(query.genre_ids.as_deref())
            .iter()
            .map(|id| {
                id.parse::<u32>()
                    .map_err(|_| AppError::InvalidInput(format!("Invalid genre id '{}'", id)))
            })
            .collect::<AppResult<Vec<u32>>>()?;

        Ok(MovieFilter {
            min_year: query.min_year,
            max_year: query.max_year,
            decade: query.decade,
            min_rating: query.min_rating,
            max_rating: query.max_rating,
            min_votes: query.min_votes,
            min_runtime: query.min_runtime,
            max_runtime: query.max_runtime,
            languages: split_list(query.languages.as_deref()),
            genre_ids,
            genre_names: split_list(query.genres.as_deref()),
            actors: split_list(query.actors.as_deref()),
            director: query.director,
            min_popularity: query.min_popularity,
        })
    }
}

/// Prepared catalog, narrowed by the given filters
pub async fn browse(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let filter = MovieFilter::try_from(query)?;
    catalog::ensure_catalog(state.provider.as_ref(), &state.engine, state.catalog_pages).await?;

    let engine = state.engine.read().await;
    let movies: Vec<Movie> = filter.apply(engine.movies()).into_iter().cloned().collect();
    Ok(Json(movies))
}

/// Rebuilds the catalog from the provider
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<Value>> {
    tracing::info!(request_id = %request_id, pages = state.catalog_pages, "Catalog refresh requested");
    let count =
        catalog::refresh(state.provider.as_ref(), &state.engine, state.catalog_pages).await?;
    Ok(Json(json!({ "movies": count })))
}
