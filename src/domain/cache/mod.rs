//! Exact cache domain - fingerprint-keyed key/value tier

mod repository;

pub use repository::ExactCache;

#[cfg(test)]
pub use repository::mock::MockExactCache;
