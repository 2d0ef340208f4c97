//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;
use crate::domain::{DomainError, QueryResponse};

pub const QUERIES_TOTAL: &str = "prompt_cache_queries_total";
pub const QUERY_ERRORS_TOTAL: &str = "prompt_cache_query_errors_total";
pub const QUERY_DURATION_SECONDS: &str = "prompt_cache_query_duration_seconds";

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl std::fmt::Debug for PrometheusMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetrics").finish_non_exhaustive()
    }
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("prompt_cache_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record the outcome of one routed query
pub fn record_query(outcome: Result<&QueryResponse, &DomainError>, elapsed: Duration) {
    match outcome {
        Ok(response) => {
            let labels = [("source", response.source().as_str().to_string())];

            counter!(QUERIES_TOTAL, &labels).increment(1);
            histogram!(QUERY_DURATION_SECONDS, &labels).record(elapsed.as_secs_f64());
        }
        Err(error) => {
            let stage = error.stage().map(|s| s.as_str()).unwrap_or("unknown");

            counter!(QUERY_ERRORS_TOTAL, "stage" => stage).increment(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QueryStage;

    #[test]
    fn test_init_metrics_disabled() {
        let config = MetricsConfig {
            enabled: false,
            ..Default::default()
        };

        assert!(init_metrics(&config).is_none());
    }

    #[test]
    fn test_record_query_counts_by_source_and_stage() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        let response = QueryResponse::generated("4", 12.5);
        let error = DomainError::at_stage(
            QueryStage::Generation,
            DomainError::provider("ollama", "down"),
        );

        metrics::with_local_recorder(&recorder, || {
            record_query(Ok(&response), Duration::from_millis(12));
            record_query(Err(&error), Duration::from_millis(3));
        });

        let rendered = handle.render();

        assert!(rendered.contains(r#"prompt_cache_queries_total{source="GENERATED"} 1"#));
        assert!(rendered.contains(r#"prompt_cache_query_errors_total{stage="generation"} 1"#));
        assert!(rendered.contains(r#"prompt_cache_query_duration_seconds_count{source="GENERATED"} 1"#));
    }

    #[test]
    fn test_record_query_without_stage_is_unknown() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_query(Err(&DomainError::internal("boom")), Duration::ZERO);
        });

        assert!(handle
            .render()
            .contains(r#"prompt_cache_query_errors_total{stage="unknown"} 1"#));
    }
}
