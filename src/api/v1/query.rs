//! Query endpoint handler

use std::time::Instant;

use axum::extract::State;
use tracing::{error, info};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, QueryRequestBody, QueryResponseBody};
use crate::domain::QueryRequest;
use crate::infrastructure::observability::record_query;

/// POST /v1/query
pub async fn query(
    State(state): State<AppState>,
    Json(body): Json<QueryRequestBody>,
) -> Result<Json<QueryResponseBody>, ApiError> {
    let request = QueryRequest::from(body);
    let started = Instant::now();

    let outcome = state.router.query(&request).await;
    record_query(outcome.as_ref(), started.elapsed());

    match outcome {
        Ok(response) => {
            info!(
                source = %response.source(),
                latency_ms = response.latency_ms(),
                "Query served"
            );
            Ok(Json(response.into()))
        }
        Err(e) => {
            error!(error = %e, stage = ?e.stage(), "Query failed");
            Err(e.into())
        }
    }
}
