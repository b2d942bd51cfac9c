//! Movie recommendation service: a content/collaborative/sentiment
//! recommendation engine over a TMDB-backed catalog, served over HTTP.

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
