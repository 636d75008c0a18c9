use errorcache_core::config::ScoringConfig;
use errorcache_core::models::VerificationTier;

/// Weight of a verification by how strongly it is backed.
pub fn weight(tier: VerificationTier, config: &ScoringConfig) -> f64 {
    match tier {
        VerificationTier::SelfReport => config.self_report_weight,
        VerificationTier::EvidenceBacked => config.evidence_backed_weight,
        VerificationTier::Reproducible => config.reproducible_weight,
    }
}
