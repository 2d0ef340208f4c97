//! Ollama generator implementation

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::llm::Generator;
use crate::domain::DomainError;
use crate::infrastructure::HttpClientTrait;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_CHAT_MODEL: &str = "llama3.2";

/// Generator backed by the Ollama chat API (non-streaming)
#[derive(Debug)]
pub struct OllamaGenerator<C: HttpClientTrait> {
    client: C,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OllamaGenerator<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_OLLAMA_CHAT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl<C: HttpClientTrait> Generator for OllamaGenerator<C> {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": false,
        });

        let json = self
            .client
            .post_json(
                &self.chat_url(),
                vec![("Content-Type", "application/json")],
                &body,
            )
            .await?;

        let response: OllamaChatResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ollama", format!("Failed to parse chat response: {}", e))
        })?;

        Ok(response.message.content)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}
