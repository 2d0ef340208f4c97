//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    create_metrics_router, init_metrics, record_query, PrometheusMetrics, QUERIES_TOTAL,
    QUERY_DURATION_SECONDS, QUERY_ERRORS_TOTAL,
};
