//! Embedder trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Turns text into a fixed-dimension vector (Ollama, OpenAI, ...)
#[async_trait]
pub trait Embedder: Send + Sync + Debug {
    /// Embed a single text; deterministic for a given model version
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
