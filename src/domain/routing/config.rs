//! Router threshold configuration

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.9;
pub const DEFAULT_PROMOTION_THRESHOLD: f32 = 0.95;

/// Similarity thresholds applied by the query router
///
/// Both comparisons are inclusive: a score equal to a threshold passes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Minimum similarity for a semantic search result to count as a hit
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Minimum similarity for a semantic hit to be promoted into the exact cache
    #[serde(default = "default_promotion_threshold")]
    pub promotion_threshold: f32,
}

fn default_similarity_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_promotion_threshold() -> f32 {
    DEFAULT_PROMOTION_THRESHOLD
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            promotion_threshold: DEFAULT_PROMOTION_THRESHOLD,
        }
    }
}

impl RouterConfig {
    pub fn new(similarity_threshold: f32, promotion_threshold: f32) -> Self {
        Self {
            similarity_threshold,
            promotion_threshold,
        }
    }

    /// Checks both thresholds lie in the cosine range and are ordered
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("similarity_threshold", self.similarity_threshold),
            ("promotion_threshold", self.promotion_threshold),
        ] {
            if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                return Err(DomainError::configuration(format!(
                    "{} must be within [-1, 1], got {}",
                    name, value
                )));
            }
        }

        if self.promotion_threshold < self.similarity_threshold {
            return Err(DomainError::configuration(format!(
                "promotion_threshold ({}) must be >= similarity_threshold ({})",
                self.promotion_threshold, self.similarity_threshold
            )));
        }

        Ok(())
    }

    pub fn is_semantic_hit(&self, similarity: f32) -> bool {
        similarity >= self.similarity_threshold
    }

    pub fn is_promotable(&self, similarity: f32) -> bool {
        similarity >= self.promotion_threshold
    }
}
