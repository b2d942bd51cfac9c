use serde::Deserialize;

use crate::engine::HybridWeights;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Concurrent TMDB requests allowed while building the catalog
    #[serde(default = "default_tmdb_max_concurrency")]
    pub tmdb_max_concurrency: usize,

    /// Pages of each TMDB list pulled into the catalog
    #[serde(default = "default_catalog_pages")]
    pub catalog_pages: u32,

    #[serde(default = "default_hybrid_content_weight")]
    pub hybrid_content_weight: f64,

    #[serde(default = "default_hybrid_collaborative_weight")]
    pub hybrid_collaborative_weight: f64,

    #[serde(default = "default_hybrid_sentiment_weight")]
    pub hybrid_sentiment_weight: f64,

    /// Minimum sentiment for a movie to reinforce a hybrid candidate
    #[serde(default = "default_hybrid_min_sentiment")]
    pub hybrid_min_sentiment: f64,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_tmdb_max_concurrency() -> usize {
    8
}

fn default_catalog_pages() -> u32 {
    5
}

fn default_hybrid_content_weight() -> f64 {
    0.4
}

fn default_hybrid_collaborative_weight() -> f64 {
    0.3
}

fn default_hybrid_sentiment_weight() -> f64 {
    0.3
}

fn default_hybrid_min_sentiment() -> f64 {
    0.2
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Hybrid blend weights
    pub fn hybrid_weights(&self) -> HybridWeights {
        HybridWeights {
            content: self.hybrid_content_weight,
            collaborative: self.hybrid_collaborative_weight,
            sentiment: self.hybrid_sentiment_weight,
            min_sentiment: self.hybrid_min_sentiment,
        }
    }
}
