use std::sync::Arc;

use crate::cache::TagCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vitrin_db::DbPool,
    /// Server configuration (JWT settings, upload directory, base URL).
    pub config: Arc<ServerConfig>,
    /// Tag-invalidated cache for public reads.
    pub cache: Arc<TagCache>,
}

impl AppState {
    pub fn new(pool: vitrin_db::DbPool, config: ServerConfig) -> Self {
        let cache = TagCache::new(
            std::time::Duration::from_secs(config.cache.ttl_secs),
            config.cache.max_entries,
        );
        Self {
            pool,
            config: Arc::new(config),
            cache: Arc::new(cache),
        }
    }
}
