//! Redis exact cache implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::cache::ExactCache;
use crate::domain::DomainError;

/// Configuration for Redis cache
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Expiry applied on every write; `None` stores keys without expiry
    pub time_to_live: Option<Duration>,
    /// Key prefix for namespacing
    pub key_prefix: Option<String>,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            time_to_live: None,
            key_prefix: None,
        }
    }
}

impl RedisCacheConfig {
    /// Creates a new configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the time-to-live
    pub fn with_time_to_live(mut self, ttl: Duration) -> Self {
        self.time_to_live = Some(ttl);
        self
    }

    /// Sets the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    fn prefix_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

/// Redis-backed exact cache
///
/// Uses single `GET` / `SET` (or `SET EX`) commands, so each operation is
/// atomic on the server. Connections are multiplexed via `ConnectionManager`.
#[derive(Clone)]
pub struct RedisExactCache {
    connection: ConnectionManager,
    config: RedisCacheConfig,
}

impl fmt::Debug for RedisExactCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisExactCache")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisExactCache {
    /// Creates a new Redis cache connection
    pub async fn new(config: RedisCacheConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::cache(format!("Failed to create Redis client: {}", e)))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    /// Creates a Redis cache with default configuration
    pub async fn with_url(url: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(RedisCacheConfig::new(url)).await
    }
}

#[async_trait]
impl ExactCache for RedisExactCache {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let prefixed_key = self.config.prefix_key(key);
        let mut conn = self.connection.clone();

        let result: Option<String> = conn.get(&prefixed_key).await.map_err(|e| {
            DomainError::cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(result)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let prefixed_key = self.config.prefix_key(key);
        let mut conn = self.connection.clone();

        let result: redis::RedisResult<()> = match self.config.time_to_live {
            Some(ttl) => conn.set_ex(&prefixed_key, value, ttl.as_secs().max(1)).await,
            None => conn.set(&prefixed_key, value).await,
        };

        result.map_err(|e| DomainError::cache(format!("Failed to set key '{}': {}", key, e)))
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: the ignored tests require a running Redis instance
    // Run with: cargo test -- --ignored

    fn get_test_config() -> RedisCacheConfig {
        RedisCacheConfig::new("redis://127.0.0.1:6379")
            .with_key_prefix("tiered-prompt-cache-test")
            .with_time_to_live(Duration::from_secs(60))
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_set_and_get() {
        let cache = RedisExactCache::new(get_test_config()).await.unwrap();

        cache.set("key1", "value1").await.unwrap();

        assert_eq!(cache.get("key1").await.unwrap(), Some("value1".to_string()));
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_get_missing() {
        let cache = RedisExactCache::new(get_test_config()).await.unwrap();

        assert!(cache.get("never-written").await.unwrap().is_none());
    }

    #[test]
    fn test_key_prefix() {
        let config = RedisCacheConfig::new("redis://localhost").with_key_prefix("prompts");

        assert_eq!(config.prefix_key("abc"), "prompts:abc");
        assert_eq!(RedisCacheConfig::default().prefix_key("abc"), "abc");
    }

    #[tokio::test]
    async fn test_invalid_url_is_cache_error() {
        let result = RedisExactCache::with_url("not a redis url").await;

        assert!(matches!(result, Err(DomainError::Cache { .. })));
    }
}
