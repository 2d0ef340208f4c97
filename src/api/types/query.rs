//! Query endpoint request and response bodies

use serde::{Deserialize, Serialize};

use crate::domain::{CacheSource, QueryRequest, QueryResponse};

/// Body of `POST /v1/query`
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequestBody {
    pub prompt: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl From<QueryRequestBody> for QueryRequest {
    fn from(body: QueryRequestBody) -> Self {
        let request = QueryRequest::new(body.prompt);

        match body.metadata {
            Some(metadata) => request.with_metadata(metadata),
            None => request,
        }
    }
}

/// Answer returned by `POST /v1/query`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponseBody {
    pub response: String,
    pub source: CacheSource,
    pub latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f32>,
}

impl From<QueryResponse> for QueryResponseBody {
    fn from(response: QueryResponse) -> Self {
        let source = response.source();
        let latency_ms = response.latency_ms();
        let similarity_score = response.similarity();

        Self {
            response: response.into_text(),
            source,
            latency_ms,
            similarity_score,
        }
    }
}
