//! Token-set similarity between signatures.

use std::collections::BTreeSet;

use crate::signature::Signature;

/// Minimum token length in characters.
const MIN_TOKEN_CHARS: usize = 2;

/// Split a normalized signature into its token set.
///
/// Separators are every character except alphanumerics, `_`, `<`, `>` and `.`.
/// Leading and trailing dots are stripped so sentence punctuation does not
/// create distinct tokens.
pub fn tokenize(normalized: &str) -> BTreeSet<String> {
    normalized
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '<' | '>' | '.')))
        .map(|t| t.trim_matches('.'))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// `|A ∩ B| / |A ∪ B|`; 0.0 when both sets are empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Similarity of two signatures. Identical fingerprints score 1.0.
pub fn similarity(a: &Signature, b: &Signature) -> f64 {
    if a.fingerprint == b.fingerprint {
        return 1.0;
    }
    jaccard(&a.tokens, &b.tokens)
}
