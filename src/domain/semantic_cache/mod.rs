//! Semantic cache domain - similarity-matched prompt/response tier

mod repository;

pub use repository::{CachedEntry, SemanticCache, SemanticSearchResult};

#[cfg(test)]
pub use repository::mock::MockSemanticCache;
