//! Embedder factory for runtime selection

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::embedding::Embedder;
use crate::domain::DomainError;
use crate::infrastructure::HttpClient;

use super::hashing::{HashingEmbedder, DEFAULT_HASHING_DIMENSIONS};
use super::ollama::{OllamaEmbedder, DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_EMBEDDING_MODEL};
use super::openai::{OpenAiEmbedder, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_EMBEDDING_MODEL};

/// Supported embedding backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedderType {
    #[default]
    Ollama,
    #[serde(alias = "open_ai")]
    OpenAi,
    Hashing,
}

/// Embedder section of the application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedderConfig {
    #[serde(default)]
    pub provider: EmbedderType,
    /// Server URL; provider default when unset
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model name; provider default when unset
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Vector length (hashing only)
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_dimensions() -> usize {
    DEFAULT_HASHING_DIMENSIONS
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            provider: EmbedderType::default(),
            base_url: None,
            model: None,
            api_key: None,
            dimensions: default_dimensions(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Factory for creating embedders
#[derive(Debug, Default)]
pub struct EmbedderFactory;

impl EmbedderFactory {
    pub fn create(config: &EmbedderConfig) -> Result<Arc<dyn Embedder>, DomainError> {
        match config.provider {
            EmbedderType::Ollama => {
                let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
                let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_OLLAMA_BASE_URL);
                let model = config.model.as_deref().unwrap_or(DEFAULT_OLLAMA_EMBEDDING_MODEL);

                Ok(Arc::new(
                    OllamaEmbedder::with_base_url(client, base_url).with_model(model),
                ))
            }
            EmbedderType::OpenAi => {
                let api_key = config.api_key.as_deref().ok_or_else(|| {
                    DomainError::configuration("OpenAI embedder requires an api_key")
                })?;
                let client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
                let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_OPENAI_BASE_URL);
                let model = config.model.as_deref().unwrap_or(DEFAULT_OPENAI_EMBEDDING_MODEL);

                Ok(Arc::new(
                    OpenAiEmbedder::with_base_url(client, api_key, base_url).with_model(model),
                ))
            }
            EmbedderType::Hashing => Ok(Arc::new(HashingEmbedder::new(config.dimensions)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn test_config_defaults() {
        let config: EmbedderConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.provider, EmbedderType::Ollama);
        assert!(config.model.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_provider_names() {
        let parse =
            |s: &str| serde_json::from_str::<EmbedderType>(&format!("\"{}\"", s)).unwrap();

        assert_eq!(parse("ollama"), EmbedderType::Ollama);
        assert_eq!(parse("openai"), EmbedderType::OpenAi);
        assert_eq!(parse("hashing"), EmbedderType::Hashing);
    }

    #[test]
    fn test_create_each_provider() {
        let ollama = EmbedderFactory::create(&EmbedderConfig::default()).unwrap();
        assert_eq!(ollama.provider_name(), "ollama");

        let hashing = EmbedderFactory::create(&EmbedderConfig {
            provider: EmbedderType::Hashing,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(hashing.provider_name(), "hashing");

        let openai = EmbedderFactory::create(&EmbedderConfig {
            provider: EmbedderType::OpenAi,
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(openai.provider_name(), "openai");
    }

    #[test]
    fn test_openai_requires_api_key() {
        let result = EmbedderFactory::create(&EmbedderConfig {
            provider: EmbedderType::OpenAi,
            ..Default::default()
        });

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_openai_keeps_configured_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(body_partial_json(json!({"model": "nomic-embed-text"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"index": 0, "embedding": [0.5, 0.5]}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let embedder = EmbedderFactory::create(&EmbedderConfig {
            provider: EmbedderType::OpenAi,
            base_url: Some(server.uri()),
            model: Some("nomic-embed-text".to_string()),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(embedder.embed("hi").await.unwrap(), vec![0.5, 0.5]);
    }

    #[tokio::test]
    async fn test_openai_falls_back_to_its_own_default_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(body_partial_json(json!({"model": DEFAULT_OPENAI_EMBEDDING_MODEL})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"index": 0, "embedding": [1.0]}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let embedder = EmbedderFactory::create(&EmbedderConfig {
            provider: EmbedderType::OpenAi,
            base_url: Some(server.uri()),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(embedder.embed("hi").await.unwrap(), vec![1.0]);
    }
}
