//! Ollama embedder implementation

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::embedding::Embedder;
use crate::domain::DomainError;
use crate::infrastructure::HttpClientTrait;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Embedder backed by a local Ollama server
#[derive(Debug)]
pub struct OllamaEmbedder<C: HttpClientTrait> {
    client: C,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OllamaEmbedder<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_OLLAMA_EMBEDDING_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/api/embeddings", self.base_url)
    }
}

#[async_trait]
impl<C: HttpClientTrait> Embedder for OllamaEmbedder<C> {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": text,
        });

        let json = self
            .client
            .post_json(
                &self.embeddings_url(),
                vec![("Content-Type", "application/json")],
                &body,
            )
            .await?;

        let response: OllamaEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ollama", format!("Failed to parse embedding response: {}", e))
        })?;

        if response.embedding.is_empty() {
            return Err(DomainError::provider(
                "ollama",
                format!("Model '{}' returned an empty embedding", self.model),
            ));
        }

        Ok(response.embedding)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}

#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}
