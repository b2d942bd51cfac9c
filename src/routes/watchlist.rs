use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Movie, MovieId, Watchlist},
    routes::movies::find_movie,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub movie_id: MovieId,
}

#[derive(Debug, Default, Deserialize)]
pub struct WatchedRequest {
    pub rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AddResponse {
    /// `false` when the movie was already queued
    pub added: bool,
    pub movie: Movie,
}

pub async fn show(State(state): State<Arc<AppState>>) -> Json<Watchlist> {
    Json(state.watchlist.read().await.clone())
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<AddRequest>,
) -> AppResult<Json<AddResponse>> {
    let movie = find_movie(&state, request.movie_id).await?;
    let added = state.watchlist.write().await.add(movie.clone());
    tracing::info!(request_id = %request_id, movie_id = %movie.id, added = added, "Watchlist add");
    Ok(Json(AddResponse { added, movie }))
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> AppResult<StatusCode> {
    if state.watchlist.write().await.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Movie {} is not on the watchlist", id)))
    }
}

/// Moves a queued movie to the watched list, optionally rating it
pub async fn mark_watched(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
    request: Option<Json<WatchedRequest>>,
) -> AppResult<Json<Movie>> {
    let rating = request.and_then(|Json(r)| r.rating);
    let mut watchlist = state.watchlist.write().await;
    watchlist
        .mark_watched(id, rating)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Movie {} is not on the watchlist", id)))
}
