//! Exact cache factory for runtime selection

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::cache::ExactCache;
use crate::domain::DomainError;

use super::in_memory::{InMemoryCacheConfig, InMemoryExactCache};
use super::redis::{RedisCacheConfig, RedisExactCache};

/// Supported exact cache backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheType {
    /// In-memory cache using moka
    #[default]
    #[serde(alias = "inmemory", alias = "memory")]
    InMemory,
    /// Redis cache
    Redis,
}

impl std::fmt::Display for CacheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheType::InMemory => write!(f, "in_memory"),
            CacheType::Redis => write!(f, "redis"),
        }
    }
}

/// Configuration for the exact cache tier
#[derive(Debug, Clone, Deserialize)]
pub struct ExactCacheConfig {
    /// Backend to create
    #[serde(default)]
    pub backend: CacheType,
    /// Redis URL (required for the Redis backend)
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Key prefix for namespacing (Redis only)
    #[serde(default)]
    pub key_prefix: Option<String>,
    /// Maximum entries (in-memory only)
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Entry lifetime in seconds; entries never expire when unset
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

fn default_max_capacity() -> u64 {
    10_000
}

impl Default for ExactCacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheType::InMemory,
            redis_url: None,
            key_prefix: None,
            max_capacity: default_max_capacity(),
            ttl_secs: None,
        }
    }
}

impl ExactCacheConfig {
    /// Creates a new configuration for in-memory cache
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Creates a new configuration for Redis cache
    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            backend: CacheType::Redis,
            redis_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Sets the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Sets the maximum capacity (in-memory only)
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    fn time_to_live(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }
}

/// Factory for creating exact cache instances
#[derive(Debug, Default)]
pub struct ExactCacheFactory;

impl ExactCacheFactory {
    /// Creates an exact cache based on configuration
    pub async fn create(config: &ExactCacheConfig) -> Result<Arc<dyn ExactCache>, DomainError> {
        match config.backend {
            CacheType::InMemory => {
                let mut in_memory_config =
                    InMemoryCacheConfig::default().with_max_capacity(config.max_capacity);

                if let Some(ttl) = config.time_to_live() {
                    in_memory_config = in_memory_config.with_time_to_live(ttl);
                }

                Ok(Arc::new(InMemoryExactCache::with_config(in_memory_config)))
            }
            CacheType::Redis => {
                let url = config.redis_url.clone().ok_or_else(|| {
                    DomainError::configuration("Redis URL is required for Redis cache type")
                })?;

                let mut redis_config = RedisCacheConfig::new(url);

                if let Some(prefix) = &config.key_prefix {
                    redis_config = redis_config.with_key_prefix(prefix.clone());
                }

                if let Some(ttl) = config.time_to_live() {
                    redis_config = redis_config.with_time_to_live(ttl);
                }

                Ok(Arc::new(RedisExactCache::new(redis_config).await?))
            }
        }
    }
}
