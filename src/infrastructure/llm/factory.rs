//! Generator factory for runtime selection

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use super::echo::EchoGenerator;
use super::ollama::{OllamaGenerator, DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_CHAT_MODEL};
use super::openai::{OpenAiGenerator, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_CHAT_MODEL};
use crate::domain::{DomainError, Generator};
use crate::infrastructure::HttpClient;

/// Supported generation backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorType {
    #[default]
    Ollama,
    #[serde(alias = "open_ai")]
    OpenAi,
    #[serde(alias = "mock")]
    Echo,
}

/// Generator section of the application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub provider: GeneratorType,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model name; provider default when unset
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: GeneratorType::default(),
            base_url: None,
            model: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Factory for creating generators
#[derive(Debug)]
pub struct GeneratorFactory;

impl GeneratorFactory {
    /// Create a generator from configuration
    pub fn create(config: &GeneratorConfig) -> Result<Arc<dyn Generator>, DomainError> {
        match config.provider {
            GeneratorType::Ollama => {
                let http_client =
                    HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
                let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_OLLAMA_BASE_URL);
                let model = config.model.as_deref().unwrap_or(DEFAULT_OLLAMA_CHAT_MODEL);

                let generator =
                    OllamaGenerator::with_base_url(http_client, base_url).with_model(model);
                Ok(Arc::new(generator))
            }

            GeneratorType::OpenAi => {
                let api_key = config.api_key.as_deref().ok_or_else(|| {
                    DomainError::configuration("OpenAI generator requires an api_key")
                })?;
                let http_client =
                    HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;
                let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_OPENAI_BASE_URL);
                let model = config.model.as_deref().unwrap_or(DEFAULT_OPENAI_CHAT_MODEL);

                let generator =
                    OpenAiGenerator::with_base_url(http_client, api_key, base_url).with_model(model);
                Ok(Arc::new(generator))
            }

            GeneratorType::Echo => Ok(Arc::new(EchoGenerator::new())),
        }
    }
}
