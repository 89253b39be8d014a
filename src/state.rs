use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::cache::{Cache, MemoryCache};
use crate::config::Config;
use crate::repository::SimuladoRepository;
use crate::services::SimuladoService;

/// Number of list/detail/question payloads kept in the in-process cache.
const CACHE_CAPACITY: usize = 512;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub simulados: Arc<SimuladoService>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new(CACHE_CAPACITY));
        Self::with_cache(pool, config, cache)
    }

    /// Wires the service graph with an explicit cache, so tests can swap in
    /// their own implementation.
    pub fn with_cache(pool: PgPool, config: Config, cache: Arc<dyn Cache>) -> Self {
        let repo = SimuladoRepository::new(pool.clone());
        let simulados = Arc::new(SimuladoService::new(repo, cache));
        Self {
            pool,
            config,
            simulados,
        }
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
