//! Domain layer - Core routing logic, values and backend contracts

pub mod cache;
pub mod embedding;
pub mod error;
pub mod fingerprint;
pub mod llm;
pub mod query;
pub mod routing;
pub mod semantic_cache;

pub use cache::ExactCache;
pub use embedding::{cosine_similarity, Embedder};
pub use error::{DomainError, QueryStage};
pub use fingerprint::{fingerprint, normalize, Fingerprint};
pub use llm::Generator;
pub use query::{CacheSource, QueryRequest, QueryResponse};
pub use routing::{QueryRouter, QueryRouterBuilder, RouterConfig};
pub use semantic_cache::{CachedEntry, SemanticCache, SemanticSearchResult};
