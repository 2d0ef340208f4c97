//! Semantic cache trait and types

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// A stored prompt/response pair with its embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry {
    id: String,
    embedding: Vec<f32>,
    prompt: String,
    response: String,
    created_at: DateTime<Utc>,
}

impl CachedEntry {
    /// Create a new entry with a fresh id
    pub fn new(prompt: impl Into<String>, response: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            embedding,
            prompt: prompt.into(),
            response: response.into(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Best match returned by a semantic search
///
/// When nothing was found the text and score are not meaningful, so they
/// are only reachable through [`SemanticSearchResult::best_match`].
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticSearchResult {
    response: String,
    similarity: f32,
    found: bool,
}

impl SemanticSearchResult {
    pub fn found(response: impl Into<String>, similarity: f32) -> Self {
        Self {
            response: response.into(),
            similarity,
            found: true,
        }
    }

    pub fn not_found() -> Self {
        Self {
            response: String::new(),
            similarity: 0.0,
            found: false,
        }
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    /// Matched response text and similarity, if a match exists
    pub fn best_match(&self) -> Option<(&str, f32)> {
        self.found.then_some((self.response.as_str(), self.similarity))
    }

    pub fn into_match(self) -> Option<(String, f32)> {
        self.found.then_some((self.response, self.similarity))
    }
}

/// Nearest-neighbour store over prompt embeddings
#[async_trait]
pub trait SemanticCache: Send + Sync + Debug {
    /// Returns the best of the `top_k` nearest entries, or not-found
    async fn search(
        &self,
        embedding: &[f32],
        top_k: usize,
    ) -> Result<SemanticSearchResult, DomainError>;

    /// Appends a new entry. Near-duplicates are not merged.
    async fn add(
        &self,
        prompt: &str,
        response: &str,
        embedding: Vec<f32>,
    ) -> Result<(), DomainError>;

    /// Backend name for logs and health output
    fn name(&self) -> &'static str;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_entry_creation() {
        let entry = CachedEntry::new("hello world", "hi there", vec![0.1, 0.2, 0.3]);

        assert_eq!(entry.prompt(), "hello world");
        assert_eq!(entry.response(), "hi there");
        assert_eq!(entry.embedding(), &[0.1, 0.2, 0.3]);
        assert!(Uuid::parse_str(entry.id()).is_ok());
    }

    #[test]
    fn test_cached_entries_get_distinct_ids() {
        let a = CachedEntry::new("q", "a", vec![1.0]);
        let b = CachedEntry::new("q", "a", vec![1.0]);

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_found_result_exposes_match() {
        let result = SemanticSearchResult::found("four", 0.93);

        assert!(result.is_found());
        assert_eq!(result.best_match(), Some(("four", 0.93)));
        assert_eq!(result.into_match(), Some(("four".to_string(), 0.93)));
    }

    #[test]
    fn test_not_found_result_hides_match() {
        let result = SemanticSearchResult::not_found();

        assert!(!result.is_found());
        assert!(result.best_match().is_none());
        assert!(result.into_match().is_none());
    }
}
