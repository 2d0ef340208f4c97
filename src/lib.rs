//! Tiered prompt cache
//!
//! Answers prompts from the cheapest tier that can:
//! - an exact cache keyed by a normalized prompt fingerprint
//! - a semantic cache searched by embedding similarity
//! - a generator (LLM), whose answers populate both caches

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::{DomainError, QueryRouter, SemanticCache};
use infrastructure::cache::ExactCacheFactory;
use infrastructure::embedding::EmbedderFactory;
use infrastructure::llm::GeneratorFactory;
use infrastructure::semantic_cache::InMemorySemanticCache;
use tracing::info;

/// Build the query router and all of its backends from configuration
pub async fn build_query_router(config: &AppConfig) -> Result<QueryRouter, DomainError> {
    let exact_cache = ExactCacheFactory::create(&config.exact_cache).await?;
    let semantic_cache: Arc<dyn SemanticCache> =
        Arc::new(InMemorySemanticCache::new(config.semantic_cache.max_entries));
    let embedder = EmbedderFactory::create(&config.embedder)?;
    let generator = GeneratorFactory::create(&config.generator)?;

    info!(
        exact_cache = exact_cache.name(),
        semantic_cache = semantic_cache.name(),
        embedder = embedder.provider_name(),
        generator = generator.provider_name(),
        similarity_threshold = config.router.similarity_threshold,
        promotion_threshold = config.router.promotion_threshold,
        "Query router backends created"
    );

    QueryRouter::new(exact_cache, semantic_cache, embedder, generator, config.router)
}
