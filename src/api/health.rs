//! Health check endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub backends: BackendNames,
}

/// Names of the configured backend for each tier
#[derive(Debug, Serialize)]
pub struct BackendNames {
    pub exact: &'static str,
    pub semantic: &'static str,
    pub embedder: &'static str,
    pub generator: &'static str,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let router = &state.router;

    let response = HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        backends: BackendNames {
            exact: router.exact_cache().name(),
            semantic: router.semantic_cache().name(),
            embedder: router.embedder().provider_name(),
            generator: router.generator().provider_name(),
        },
    };

    (StatusCode::OK, Json(response))
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
