//! Exact cache infrastructure - in-memory and Redis backends

mod factory;
mod in_memory;
mod redis;

pub use factory::{CacheType, ExactCacheConfig, ExactCacheFactory};
pub use in_memory::{InMemoryCacheConfig, InMemoryExactCache};
pub use redis::{RedisCacheConfig, RedisExactCache};
