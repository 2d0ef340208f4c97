//! In-memory exact cache implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::ExactCache;
use crate::domain::DomainError;

/// Configuration for in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// Time-to-live for every entry; `None` keeps entries until evicted
    pub time_to_live: Option<Duration>,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            time_to_live: None,
        }
    }
}

impl InMemoryCacheConfig {
    /// Creates a new configuration with specified max capacity
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    /// Sets the time-to-live
    pub fn with_time_to_live(mut self, ttl: Duration) -> Self {
        self.time_to_live = Some(ttl);
        self
    }
}

/// Thread-safe in-memory exact cache
///
/// Each `get` and `set` is atomic on its own; moka evicts with a
/// TinyLFU policy once `max_capacity` is reached.
#[derive(Debug)]
pub struct InMemoryExactCache {
    cache: MokaCache<String, String>,
}

impl InMemoryExactCache {
    /// Creates a new in-memory cache with default configuration
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    /// Creates a new in-memory cache with the given configuration
    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let mut builder = MokaCache::builder().max_capacity(config.max_capacity);

        if let Some(ttl) = config.time_to_live {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
        }
    }

    /// Approximate number of entries
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

impl Default for InMemoryExactCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExactCache for InMemoryExactCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
