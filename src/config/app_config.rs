use serde::Deserialize;

use crate::domain::RouterConfig;
use crate::infrastructure::cache::ExactCacheConfig;
use crate::infrastructure::embedding::EmbedderConfig;
use crate::infrastructure::llm::GeneratorConfig;
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::semantic_cache::DEFAULT_MAX_ENTRIES;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub exact_cache: ExactCacheConfig,
    #[serde(default)]
    pub semantic_cache: SemanticCacheConfig,
    #[serde(default)]
    pub embedder: EmbedderConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemanticCacheConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_level() -> String {
    "info".to_string()
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for SemanticCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

impl AppConfig {
    /// Layers `config/default`, `config/local` and `APP__*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::CacheType;
    use crate::infrastructure::embedding::EmbedderType;
    use crate::infrastructure::llm::GeneratorType;

    fn from_toml(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.router.similarity_threshold, 0.9);
        assert_eq!(config.router.promotion_threshold, 0.95);
        assert_eq!(config.exact_cache.backend, CacheType::InMemory);
        assert_eq!(config.semantic_cache.max_entries, 10_000);
        assert_eq!(config.embedder.provider, EmbedderType::Ollama);
        assert!(config.generator.model.is_none());
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = from_toml("");

        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.embedder.model.is_none());
    }

    #[test]
    fn test_partial_overrides() {
        let config = from_toml(
            r#"
            [router]
            similarity_threshold = 0.85

            [exact_cache]
            backend = "redis"
            redis_url = "redis://cache:6379"
            ttl_secs = 3600

            [embedder]
            provider = "hashing"
            dimensions = 64

            [generator]
            provider = "openai"
            model = "llama3.2"

            [logging]
            format = "json"
            "#,
        );

        assert_eq!(config.router.similarity_threshold, 0.85);
        assert_eq!(config.router.promotion_threshold, 0.95);
        assert_eq!(config.exact_cache.backend, CacheType::Redis);
        assert_eq!(config.exact_cache.ttl_secs, Some(3600));
        assert_eq!(config.embedder.provider, EmbedderType::Hashing);
        assert_eq!(config.embedder.dimensions, 64);
        assert_eq!(config.generator.provider, GeneratorType::OpenAi);
        assert_eq!(config.generator.model.as_deref(), Some("llama3.2"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
