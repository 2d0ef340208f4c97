//! In-memory semantic cache implementation

use std::collections::VecDeque;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::embedding::cosine_similarity;
use crate::domain::semantic_cache::{CachedEntry, SemanticCache, SemanticSearchResult};
use crate::domain::DomainError;

/// Default upper bound on stored entries
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// In-memory semantic cache using linear search
///
/// Entries are kept in insertion order, so the front of the queue is always
/// the oldest entry and is the one evicted once `max_entries` is reached.
#[derive(Debug)]
pub struct InMemorySemanticCache {
    entries: RwLock<VecDeque<CachedEntry>>,
    max_entries: usize,
}

impl InMemorySemanticCache {
    /// Create a new in-memory semantic cache
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> Result<usize, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::semantic_cache(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for InMemorySemanticCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

#[async_trait]
impl SemanticCache for InMemorySemanticCache {
    async fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<SemanticSearchResult, DomainError> {
        let entries = self.entries.read().map_err(|e| {
            DomainError::semantic_cache(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut scored: Vec<(f32, &CachedEntry)> = entries
            .iter()
            .map(|entry| (cosine_similarity(embedding, entry.embedding()), entry))
            .collect();

        // Sort by similarity descending
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        let result = match scored.first() {
            Some((similarity, entry)) => {
                SemanticSearchResult::found(entry.response(), *similarity)
            }
            None => SemanticSearchResult::not_found(),
        };

        debug!(
            candidates = entries.len(),
            top_k,
            found = result.is_found(),
            "Semantic cache search complete"
        );

        Ok(result)
    }

    async fn add(
        &self,
        prompt: &str,
        response: &str,
        embedding: Vec<f32>,
    ) -> Result<(), DomainError> {
        let mut entries = self.entries.write().map_err(|e| {
            DomainError::semantic_cache(format!("Failed to acquire write lock: {}", e))
        })?;

        while entries.len() >= self.max_entries {
            if let Some(evicted) = entries.pop_front() {
                debug!(entry_id = %evicted.id(), "Evicted oldest semantic cache entry");
            }
        }

        entries.push_back(CachedEntry::new(prompt, response, embedding));

        Ok(())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
