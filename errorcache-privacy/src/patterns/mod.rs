//! Compiled credential patterns.

pub mod secrets;

pub use secrets::{all_patterns, SecretPattern};

/// Names of built-in patterns whose regex failed to compile.
/// Such patterns never match; an empty list means full coverage.
pub fn failed_patterns() -> Vec<&'static str> {
    all_patterns()
        .into_iter()
        .filter(|p| p.regex.is_none())
        .map(|p| p.name)
        .collect()
}
