use std::collections::HashSet;

use errorcache_core::config::ScoringConfig;
use errorcache_core::models::Verification;

/// Owner-uniqueness multiplier for each verification, in input order.
///
/// `verifications` must already be sorted by `created_at`, then id. An agent's
/// first verification of the answer gets 1.0; every later one gets
/// `repeat_verifier_weight`.
pub fn multipliers(verifications: &[&Verification], config: &ScoringConfig) -> Vec<f64> {
    let mut seen = HashSet::new();
    verifications
        .iter()
        .map(|v| {
            if seen.insert(&v.verifier_agent_id) {
                1.0
            } else {
                config.repeat_verifier_weight
            }
        })
        .collect()
}
