//! Query router - tiered exact / semantic / generated lookup
//!
//! Stages run in a fixed order and the first one that produces an answer wins:
//!
//! 1. exact lookup by prompt fingerprint
//! 2. semantic search over the prompt embedding
//! 3. promotion of strong semantic hits into the exact cache
//! 4. generation, populating both caches

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use super::RouterConfig;
use crate::domain::cache::ExactCache;
use crate::domain::embedding::Embedder;
use crate::domain::fingerprint::Fingerprint;
use crate::domain::llm::Generator;
use crate::domain::query::{QueryRequest, QueryResponse};
use crate::domain::semantic_cache::SemanticCache;
use crate::domain::{DomainError, QueryStage};

/// Number of neighbours requested from the semantic cache
pub const SEMANTIC_TOP_K: usize = 1;

/// Tiered query router
///
/// Holds no per-request state; a single instance can serve concurrent
/// queries against shared backends.
#[derive(Debug, Clone)]
pub struct QueryRouter {
    exact_cache: Arc<dyn ExactCache>,
    semantic_cache: Arc<dyn SemanticCache>,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    config: RouterConfig,
}

impl QueryRouter {
    /// Create a router, rejecting invalid threshold configuration
    pub fn new(
        exact_cache: Arc<dyn ExactCache>,
        semantic_cache: Arc<dyn SemanticCache>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
        config: RouterConfig,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        Ok(Self {
            exact_cache,
            semantic_cache,
            embedder,
            generator,
            config,
        })
    }

    pub fn builder() -> QueryRouterBuilder {
        QueryRouterBuilder::default()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn exact_cache(&self) -> &Arc<dyn ExactCache> {
        &self.exact_cache
    }

    pub fn semantic_cache(&self) -> &Arc<dyn SemanticCache> {
        &self.semantic_cache
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    pub fn generator(&self) -> &Arc<dyn Generator> {
        &self.generator
    }

    /// Answer a prompt from the cheapest tier that can
    ///
    /// Any backend failure aborts the query and is returned wrapped in
    /// [`DomainError::Stage`] naming the stage that failed.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, DomainError> {
        let start = Instant::now();
        let prompt = request.prompt();
        let key = Fingerprint::of(prompt);

        let cached = self
            .exact_cache
            .get(key.as_str())
            .await
            .map_err(at(QueryStage::ExactLookup))?;

        if let Some(text) = cached {
            let response = QueryResponse::exact_hit(text, elapsed_ms(start));
            info!(
                fingerprint = %key,
                source = %response.source(),
                latency_ms = response.latency_ms(),
                "Exact cache hit"
            );
            return Ok(response);
        }

        debug!(fingerprint = %key, "Exact cache miss");

        let embedding = self
            .embedder
            .embed(prompt)
            .await
            .map_err(at(QueryStage::Embedding))?;

        let result = self
            .semantic_cache
            .search(&embedding, SEMANTIC_TOP_K)
            .await
            .map_err(at(QueryStage::SemanticSearch))?;

        if let Some((text, similarity)) = result.into_match() {
            if self.config.is_semantic_hit(similarity) {
                let promoted = self.config.is_promotable(similarity);

                if promoted {
                    self.exact_cache
                        .set(key.as_str(), &text)
                        .await
                        .map_err(at(QueryStage::Promotion))?;
                }

                let response = QueryResponse::semantic_hit(text, elapsed_ms(start), similarity);
                info!(
                    fingerprint = %key,
                    source = %response.source(),
                    similarity,
                    promoted,
                    latency_ms = response.latency_ms(),
                    "Semantic cache hit"
                );
                return Ok(response);
            }

            debug!(
                similarity,
                threshold = self.config.similarity_threshold,
                "Semantic match below threshold"
            );
        } else {
            debug!("Semantic cache miss");
        }

        let text = self
            .generator
            .generate(prompt)
            .await
            .map_err(at(QueryStage::Generation))?;

        self.exact_cache
            .set(key.as_str(), &text)
            .await
            .map_err(at(QueryStage::ExactPopulate))?;

        self.semantic_cache
            .add(prompt, &text, embedding)
            .await
            .map_err(at(QueryStage::SemanticPopulate))?;

        let response = QueryResponse::generated(text, elapsed_ms(start));
        info!(
            fingerprint = %key,
            source = %response.source(),
            latency_ms = response.latency_ms(),
            "Generated response and populated caches"
        );

        Ok(response)
    }
}

fn at(stage: QueryStage) -> impl FnOnce(DomainError) -> DomainError {
    move |source| DomainError::at_stage(stage, source)
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Builder for [`QueryRouter`]
///
/// Every collaborator is required; `build` reports the first one missing.
#[derive(Debug, Default)]
pub struct QueryRouterBuilder {
    exact_cache: Option<Arc<dyn ExactCache>>,
    semantic_cache: Option<Arc<dyn SemanticCache>>,
    embedder: Option<Arc<dyn Embedder>>,
    generator: Option<Arc<dyn Generator>>,
    config: RouterConfig,
}

impl QueryRouterBuilder {
    pub fn exact_cache(mut self, cache: Arc<dyn ExactCache>) -> Self {
        self.exact_cache = Some(cache);
        self
    }

    pub fn semantic_cache(mut self, cache: Arc<dyn SemanticCache>) -> Self {
        self.semantic_cache = Some(cache);
        self
    }

    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<QueryRouter, DomainError> {
        QueryRouter::new(
            self.exact_cache.ok_or_else(|| missing("exact_cache"))?,
            self.semantic_cache.ok_or_else(|| missing("semantic_cache"))?,
            self.embedder.ok_or_else(|| missing("embedder"))?,
            self.generator.ok_or_else(|| missing("generator"))?,
            self.config,
        )
    }
}

fn missing(collaborator: &str) -> DomainError {
    DomainError::configuration(format!("Query router requires a {}", collaborator))
}
