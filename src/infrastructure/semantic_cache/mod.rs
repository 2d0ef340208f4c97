//! Semantic cache infrastructure

mod in_memory;

pub use in_memory::{InMemorySemanticCache, DEFAULT_MAX_ENTRIES};
