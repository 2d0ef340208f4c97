use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for answer generators (Ollama, OpenAI, ...)
///
/// Generators may be slow and expensive; they never cache on their own.
#[async_trait]
pub trait Generator: Send + Sync + Debug {
    /// Produce an answer for the prompt
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
