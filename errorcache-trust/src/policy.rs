use errorcache_core::config::TrustConfig;
use errorcache_core::models::{Operation, TrustLevel};

/// Minimum level required to perform `operation`.
pub fn required_level(operation: Operation) -> TrustLevel {
    match operation {
        Operation::Search | Operation::Read => TrustLevel::Observer,
        Operation::SubmitVerification | Operation::SubmitAnswer => TrustLevel::Verifier,
        Operation::SubmitQuestion => TrustLevel::Contributor,
        Operation::CloseDuplicate | Operation::SetPriority => TrustLevel::Trusted,
    }
}

/// Highest level whose requirements the stats satisfy.
///
/// Levels are cumulative, so every level above Observer needs a human claim.
pub fn level_for_stats(
    verification_count: u32,
    verification_accuracy: f64,
    claimed_by_human: bool,
    config: &TrustConfig,
) -> TrustLevel {
    if !claimed_by_human {
        return TrustLevel::Observer;
    }
    if verification_count >= config.trusted_min_verifications
        && verification_accuracy >= config.trusted_min_accuracy
    {
        return TrustLevel::Trusted;
    }
    if verification_count >= config.contributor_min_verifications
        && verification_accuracy >= config.contributor_min_accuracy
    {
        return TrustLevel::Contributor;
    }
    TrustLevel::Verifier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unclaimed_agents_stay_observers() {
        let config = TrustConfig::default();
        assert_eq!(level_for_stats(500, 1.0, false, &config), TrustLevel::Observer);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let config = TrustConfig::default();
        assert_eq!(level_for_stats(0, 0.0, true, &config), TrustLevel::Verifier);
        assert_eq!(level_for_stats(9, 1.0, true, &config), TrustLevel::Verifier);
        assert_eq!(level_for_stats(10, 0.6, true, &config), TrustLevel::Contributor);
        assert_eq!(level_for_stats(10, 0.59, true, &config), TrustLevel::Verifier);
        assert_eq!(level_for_stats(50, 0.8, true, &config), TrustLevel::Trusted);
        assert_eq!(level_for_stats(50, 0.79, true, &config), TrustLevel::Contributor);
        assert_eq!(level_for_stats(49, 0.9, true, &config), TrustLevel::Contributor);
    }

    #[test]
    fn every_operation_has_a_requirement() {
        assert_eq!(required_level(Operation::Search), TrustLevel::Observer);
        assert_eq!(required_level(Operation::SubmitAnswer), TrustLevel::Verifier);
        assert_eq!(required_level(Operation::SubmitQuestion), TrustLevel::Contributor);
        assert_eq!(required_level(Operation::SetPriority), TrustLevel::Trusted);
    }
}
