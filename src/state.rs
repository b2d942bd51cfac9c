use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    engine::{EngineConfig, RecommendationEngine},
    models::Watchlist,
    services::providers::MetadataProvider,
};

/// Shared application state
pub struct AppState {
    pub provider: Arc<dyn MetadataProvider>,
    /// Writers only swap in freshly prepared snapshots
    pub engine: RwLock<RecommendationEngine>,
    pub watchlist: RwLock<Watchlist>,
    /// Pages of each curated list pulled into the catalog
    pub catalog_pages: u32,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        engine_config: EngineConfig,
        catalog_pages: u32,
    ) -> Self {
        Self {
            provider,
            engine: RwLock::new(RecommendationEngine::new(engine_config)),
            watchlist: RwLock::new(Watchlist::new()),
            catalog_pages,
        }
    }
}
