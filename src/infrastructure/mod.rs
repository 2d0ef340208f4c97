//! Infrastructure layer - External service implementations

pub mod cache;
pub mod embedding;
mod http_client;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod semantic_cache;

pub use http_client::{HttpClient, HttpClientTrait};

#[cfg(test)]
pub use http_client::mock::MockHttpClient;
