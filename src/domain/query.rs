//! Request and response values of a routed query

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CacheSource {
    ExactHit,
    SemanticHit,
    Generated,
    /// Never produced by the router; generation is the terminal fallback.
    Miss,
}

impl CacheSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactHit => "EXACT_HIT",
            Self::SemanticHit => "SEMANTIC_HIT",
            Self::Generated => "GENERATED",
            Self::Miss => "MISS",
        }
    }
}

impl fmt::Display for CacheSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prompt submitted to the router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Value>,
}

impl QueryRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            metadata: None,
        }
    }

    /// Attach opaque caller metadata; the router never reads it
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }
}

/// The unified answer of a routed query
///
/// A similarity score is carried only by semantic hits; the constructors
/// are the only way to build a response, so no other combination exists.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    text: String,
    source: CacheSource,
    latency_ms: f64,
    similarity: Option<f32>,
}

impl QueryResponse {
    pub fn exact_hit(text: impl Into<String>, latency_ms: f64) -> Self {
        Self::build(text, CacheSource::ExactHit, latency_ms, None)
    }

    pub fn semantic_hit(text: impl Into<String>, latency_ms: f64, similarity: f32) -> Self {
        Self::build(text, CacheSource::SemanticHit, latency_ms, Some(similarity))
    }

    pub fn generated(text: impl Into<String>, latency_ms: f64) -> Self {
        Self::build(text, CacheSource::Generated, latency_ms, None)
    }

    fn build(
        text: impl Into<String>,
        source: CacheSource,
        latency_ms: f64,
        similarity: Option<f32>,
    ) -> Self {
        Self {
            text: text.into(),
            source,
            latency_ms: latency_ms.max(0.0),
            similarity,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn source(&self) -> CacheSource {
        self.source
    }

    /// Elapsed time in fractional milliseconds
    pub fn latency_ms(&self) -> f64 {
        self.latency_ms
    }

    pub fn similarity(&self) -> Option<f32> {
        self.similarity
    }
}
