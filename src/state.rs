use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::catalog::Catalog;
use crate::config::{Config, LlmConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only for the life of the process; search never mutates it.
    pub catalog: Arc<Catalog>,
    pub http_client: reqwest::Client,
    pub llm_config: Arc<RwLock<LlmConfig>>,
    /// Bounds concurrent generation calls (audit, blog, media).
    pub generation_semaphore: Arc<tokio::sync::Semaphore>,
    search_generation: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = Catalog::load(config.catalog_path.as_deref())?;

        let llm_config = config.llm.clone();
        let max_generations = config.max_concurrent_generations;

        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            http_client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            llm_config: Arc::new(RwLock::new(llm_config)),
            generation_semaphore: Arc::new(tokio::sync::Semaphore::new(max_generations)),
            search_generation: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Hand out the next search generation token. Tokens increase
    /// monotonically; a caller with overlapping searches keeps only the
    /// response carrying the highest token, which turns the unordered
    /// completion race into last-query-wins.
    pub fn next_search_generation(&self) -> u64 {
        self.search_generation.fetch_add(1, Ordering::Relaxed) + 1
    }
}
