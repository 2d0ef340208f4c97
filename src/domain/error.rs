use std::fmt;

use thiserror::Error;

/// Stage of a routed query, used to tag backend failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStage {
    ExactLookup,
    Embedding,
    SemanticSearch,
    Promotion,
    Generation,
    ExactPopulate,
    SemanticPopulate,
}

impl QueryStage {
    /// Stable snake_case label (used for logs and metric labels)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactLookup => "exact_lookup",
            Self::Embedding => "embedding",
            Self::SemanticSearch => "semantic_search",
            Self::Promotion => "promotion",
            Self::Generation => "generation",
            Self::ExactPopulate => "exact_populate",
            Self::SemanticPopulate => "semantic_populate",
        }
    }
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Semantic cache error: {message}")]
    SemanticCache { message: String },

    #[error("Query failed at {stage} stage: {source}")]
    Stage {
        stage: QueryStage,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    pub fn semantic_cache(message: impl Into<String>) -> Self {
        Self::SemanticCache {
            message: message.into(),
        }
    }

    /// Wraps a backend failure with the stage it happened in
    pub fn at_stage(stage: QueryStage, source: DomainError) -> Self {
        Self::Stage {
            stage,
            source: Box::new(source),
        }
    }

    /// Returns the failing stage, if this error came out of a routed query
    pub fn stage(&self) -> Option<QueryStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Returns the innermost error, skipping stage wrappers
    pub fn root(&self) -> &DomainError {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("ollama", "connection refused");
        assert_eq!(error.to_string(), "Provider error: ollama - connection refused");
    }

    #[test]
    fn test_stage_error_display() {
        let error = DomainError::at_stage(
            QueryStage::SemanticPopulate,
            DomainError::semantic_cache("index unavailable"),
        );

        assert_eq!(
            error.to_string(),
            "Query failed at semantic_populate stage: Semantic cache error: index unavailable"
        );
        assert_eq!(error.stage(), Some(QueryStage::SemanticPopulate));
    }

    #[test]
    fn test_root_skips_stage_wrapper() {
        let error = DomainError::at_stage(QueryStage::Generation, DomainError::provider("openai", "quota"));

        assert!(matches!(error.root(), DomainError::Provider { .. }));
        assert_eq!(DomainError::cache("x").stage(), None);
    }
}
