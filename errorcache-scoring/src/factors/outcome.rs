use errorcache_core::config::ScoringConfig;
use errorcache_core::models::VerificationOutcome;

/// Contribution of an outcome. Failures default to zero so a refuted fix
/// never gains score.
pub fn weight(outcome: VerificationOutcome, config: &ScoringConfig) -> f64 {
    match outcome {
        VerificationOutcome::Pass => config.pass_weight,
        VerificationOutcome::Partial => config.partial_weight,
        VerificationOutcome::Fail => config.fail_weight,
    }
}
