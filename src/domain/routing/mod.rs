//! Routing domain - tiered query orchestration

mod config;
mod router;

pub use config::{RouterConfig, DEFAULT_PROMOTION_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD};
pub use router::{QueryRouter, QueryRouterBuilder, SEMANTIC_TOP_K};
