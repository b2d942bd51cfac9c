use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{Recommendation, SentimentRecommendation, UserRatings},
    services::{
        catalog,
        recommendations::{self, ContentRecommendations},
    },
    state::AppState,
};

const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    pub title: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    #[serde(default)]
    pub min_sentiment: f64,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RatingsRequest {
    pub ratings: Option<UserRatings>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct HybridRequest {
    pub title: Option<String>,
    pub ratings: Option<UserRatings>,
    pub limit: Option<i64>,
}

/// Result count for a requested limit; zero or negative asks for nothing
fn result_count(limit: Option<i64>) -> usize {
    usize::try_from(limit.unwrap_or(DEFAULT_LIMIT)).unwrap_or(0)
}

/// Explicit ratings, or the ones recorded in the watchlist
async fn ratings_or_watchlist(state: &AppState, ratings: Option<UserRatings>) -> UserRatings {
    match ratings {
        Some(ratings) => ratings,
        None => state.watchlist.read().await.ratings.clone(),
    }
}

async fn ensure_catalog(state: &AppState) -> AppResult<()> {
    catalog::ensure_catalog(state.provider.as_ref(), &state.engine, state.catalog_pages).await
}

/// Movies similar in content to a seed title, with keyword fallback
pub async fn content(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<TitleRequest>,
) -> AppResult<Json<ContentRecommendations>> {
    ensure_catalog(&state).await?;
    let n = result_count(request.limit);
    tracing::info!(request_id = %request_id, title = %request.title, limit = n, "Content recommendations requested");

    let recs =
        recommendations::similar_movies(state.provider.as_ref(), &state.engine, &request.title, n)
            .await;
    Ok(Json(recs))
}

pub async fn keywords(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TitleRequest>,
) -> AppResult<Json<Vec<Recommendation>>> {
    ensure_catalog(&state).await?;
    let n = result_count(request.limit);
    let recs = state.engine.read().await.recommend_by_keywords(&request.title, n);
    Ok(Json(recs))
}

pub async fn sentiment(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SentimentRequest>,
) -> AppResult<Json<Vec<SentimentRecommendation>>> {
    ensure_catalog(&state).await?;
    let n = result_count(request.limit);
    let recs = state
        .engine
        .read()
        .await
        .recommend_by_sentiment(request.min_sentiment, n);
    Ok(Json(recs))
}

pub async fn collaborative(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RatingsRequest>,
) -> AppResult<Json<Vec<Recommendation>>> {
    ensure_catalog(&state).await?;
    let n = result_count(request.limit);
    let ratings = ratings_or_watchlist(&state, request.ratings).await;
    tracing::info!(request_id = %request_id, rated = ratings.len(), limit = n, "Collaborative recommendations requested");

    let recs = state.engine.read().await.recommend_collaborative(&ratings, n);
    Ok(Json(recs))
}

pub async fn hybrid(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<HybridRequest>,
) -> AppResult<Json<Vec<Recommendation>>> {
    ensure_catalog(&state).await?;
    let n = result_count(request.limit);
    let ratings = ratings_or_watchlist(&state, request.ratings).await;
    let ratings = (!ratings.is_empty()).then_some(ratings);
    tracing::info!(
        request_id = %request_id,
        title = ?request.title,
        rated = ratings.as_ref().map_or(0, |r| r.len()),
        limit = n,
        "Hybrid recommendations requested"
    );

    let recs = recommendations::hybrid_movies(
        state.provider.as_ref(),
        &state.engine,
        request.title.as_deref(),
        ratings.as_ref(),
        n,
    )
    .await;
    Ok(Json(recs))
}
