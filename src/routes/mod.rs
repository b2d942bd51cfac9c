use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    state::AppState,
};

pub mod catalog;
pub mod movies;
pub mod recommendations;
pub mod watchlist;

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies/search", get(movies::search))
        .route("/movies/resolve", get(movies::resolve))
        .route("/movies/compare", get(movies::compare))
        .route("/movies/lists/:list", get(movies::list))
        .route("/movies/:id", get(movies::details))
        .route("/movies/:id/sentiment", get(movies::sentiment))
        .route("/catalog", get(catalog::browse))
        .route("/catalog/refresh", post(catalog::refresh))
        .route("/recommendations/content", post(recommendations::content))
        .route("/recommendations/keywords", post(recommendations::keywords))
        .route("/recommendations/sentiment", post(recommendations::sentiment))
        .route("/recommendations/collaborative", post(recommendations::collaborative))
        .route("/recommendations/hybrid", post(recommendations::hybrid))
        .route("/watchlist", get(watchlist::show).post(watchlist::add))
        .route("/watchlist/:id", delete(watchlist::remove))
        .route("/watchlist/:id/watched", post(watchlist::mark_watched))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
