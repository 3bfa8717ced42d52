use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use index::{CompoundIndex, IndexStats};
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// Shared application state
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Published index handle. Readers clone the `Arc` and drop the lock
    /// before resolving; a reload swaps in a freshly built index.
    index: RwLock<Arc<CompoundIndex>>,

    /// Process start, for uptime reporting
    started_at: Instant,
}

impl ServerState {
    /// Create new server state, loading the configured dataset.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let index = CompoundIndex::load(&config.index_config()?)?;
        Ok(Self::with_index(config, index))
    }

    /// Create server state around an index that is already built.
    pub fn with_index(config: ServerConfig, index: CompoundIndex) -> Self {
        Self {
            config: Arc::new(config),
            index: RwLock::new(Arc::new(index)),
            started_at: Instant::now(),
        }
    }

    /// Current index.
    pub fn index(&self) -> Arc<CompoundIndex> {
        let guard = self
            .index
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Publish a new index. In-flight requests keep the one they started with.
    pub fn swap_index(&self, index: CompoundIndex) {
        let mut guard = self
            .index
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(index);
    }

    /// Rebuild the index from the configured dataset and swap it in.
    ///
    /// On failure the current index stays in service.
    pub async fn reload(&self) -> ServerResult<IndexStats> {
        let index_cfg = self.config.index_config()?;
        let index = tokio::task::spawn_blocking(move || CompoundIndex::load(&index_cfg))
            .await
            .map_err(|err| ServerError::Internal(format!("index reload task failed: {err}")))??;

        let stats = index.stats();
        self.swap_index(index);
        tracing::info!(compounds = stats.compounds, "Index reloaded");
        Ok(stats)
    }

    /// Check if API key is valid
    pub fn is_valid_api_key(&self, key: &str) -> bool {
        self.config.api_keys.contains(key)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
    pub index: IndexStats,
}
