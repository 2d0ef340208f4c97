//! Offline embedder producing deterministic pseudo-random vectors

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::embedding::{normalize_in_place, Embedder};
use crate::domain::{normalize, DomainError};

pub const DEFAULT_HASHING_DIMENSIONS: usize = 384;

/// Embedder that seeds a unit vector from the SHA-256 of the normalized text
///
/// Texts that normalize identically map to the same vector; anything else is
/// effectively uncorrelated. Useful for running without a model server.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Result<Self, DomainError> {
        if dimensions == 0 {
            return Err(DomainError::configuration(
                "Hashing embedder dimensions must be greater than zero",
            ));
        }

        Ok(Self { dimensions })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let normalized = normalize(text);
        let mut vector = Vec::with_capacity(self.dimensions);
        let mut block: u32 = 0;

        while vector.len() < self.dimensions {
            let digest = Sha256::new()
                .chain_update(normalized.as_bytes())
                .chain_update(block.to_le_bytes())
                .finalize();

            for chunk in digest.chunks_exact(4) {
                if vector.len() == self.dimensions {
                    break;
                }
                let raw = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                vector.push((raw as f64 / u32::MAX as f64 * 2.0 - 1.0) as f32);
            }

            block += 1;
        }

        normalize_in_place(&mut vector);
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_HASHING_DIMENSIONS,
        }
    }
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        Ok(self.vector_for(text))
    }

    fn provider_name(&self) -> &'static str {
        "hashing"
    }
}
