//! Prompt normalization and fingerprinting
//!
//! The fingerprint is the exact-cache key: a SHA-256 digest of the
//! normalized prompt, rendered as lowercase hex.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of a rendered fingerprint in hex characters
pub const FINGERPRINT_LEN: usize = 64;

/// Deterministic exact-cache key derived from normalized prompt text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprints the given prompt text
    pub fn of(text: &str) -> Self {
        let digest = Sha256::digest(normalize(text).as_bytes());
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trims, collapses whitespace runs to a single space and lowercases
pub fn normalize(text: &str) -> String {
    text.split(is_separator)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Unicode whitespace plus the ASCII information separators U+001C..=U+001F
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Shorthand for [`Fingerprint::of`]
pub fn fingerprint(text: &str) -> Fingerprint {
    Fingerprint::of(text)
}
