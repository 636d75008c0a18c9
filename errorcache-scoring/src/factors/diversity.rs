use std::collections::HashSet;

use errorcache_core::config::ScoringConfig;

/// Environment diversity bonus: `min(1 + step × (distinct − 1), cap)`.
///
/// Labels are compared trimmed and lowercased. With no labels the factor is 1.0.
pub fn calculate<'a, I>(environments: I, config: &ScoringConfig) -> (f64, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let distinct: HashSet<String> = environments
        .into_iter()
        .map(|e| e.trim().to_lowercase())
        .collect();
    let count = distinct.len();
    if count == 0 {
        return (1.0, 0);
    }
    let factor = 1.0 + config.diversity_step * (count - 1) as f64;
    (factor.min(config.diversity_cap), count)
}
