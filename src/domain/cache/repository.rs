//! Exact-match cache trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Key-value cache keyed by prompt fingerprint
///
/// Implementations must make each `get` and `set` atomic on its own; callers
/// never rely on transactions spanning several calls.
#[async_trait]
pub trait ExactCache: Send + Sync + Debug {
    /// Gets a previously stored value; a missing key is `Ok(None)`
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores a value, overwriting any previous one
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Backend name for logs and health output
    fn name(&self) -> &'static str;
}
