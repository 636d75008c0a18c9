use std::collections::BTreeSet;
use std::sync::Arc;

use crate::normalize::normalize;
use crate::similarity::tokenize;

/// Normalized form of an error text, ready for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub normalized: String,
    /// blake3 hex digest of `normalized`.
    pub fingerprint: String,
    pub tokens: Arc<BTreeSet<String>>,
}

impl Signature {
    pub fn from_error(raw: &str) -> Self {
        Self::from_normalized(normalize(raw))
    }

    /// Build from text that is already normalized (e.g. loaded from storage).
    pub fn from_normalized(normalized: String) -> Self {
        let fingerprint = fingerprint(&normalized);
        let tokens = Arc::new(tokenize(&normalized));
        Self {
            normalized,
            fingerprint,
            tokens,
        }
    }
}

pub fn fingerprint(normalized: &str) -> String {
    blake3::hash(normalized.as_bytes()).to_hex().to_string()
}
