//! Embedding domain - text to vector capability

mod provider;
mod similarity;

pub use provider::Embedder;
pub use similarity::{cosine_similarity, normalize_in_place};

#[cfg(test)]
pub use provider::mock::MockEmbedder;
