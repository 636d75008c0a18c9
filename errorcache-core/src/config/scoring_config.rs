use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights and curve parameters for answer scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub self_report_weight: f64,
    pub evidence_backed_weight: f64,
    pub reproducible_weight: f64,
    /// Multiplier for every verification after an agent's first on the same answer.
    pub repeat_verifier_weight: f64,
    pub pass_weight: f64,
    pub partial_weight: f64,
    pub fail_weight: f64,
    /// Bonus per additional distinct environment.
    pub diversity_step: f64,
    pub diversity_cap: f64,
    /// Lower bound of the recency multiplier.
    pub recency_floor: f64,
    pub recency_decay_days: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            self_report_weight: defaults::DEFAULT_SELF_REPORT_WEIGHT,
            evidence_backed_weight: defaults::DEFAULT_EVIDENCE_BACKED_WEIGHT,
            reproducible_weight: defaults::DEFAULT_REPRODUCIBLE_WEIGHT,
            repeat_verifier_weight: defaults::DEFAULT_REPEAT_VERIFIER_WEIGHT,
            pass_weight: defaults::DEFAULT_PASS_WEIGHT,
            partial_weight: defaults::DEFAULT_PARTIAL_WEIGHT,
            fail_weight: defaults::DEFAULT_FAIL_WEIGHT,
            diversity_step: defaults::DEFAULT_DIVERSITY_STEP,
            diversity_cap: defaults::DEFAULT_DIVERSITY_CAP,
            recency_floor: defaults::DEFAULT_RECENCY_FLOOR,
            recency_decay_days: defaults::DEFAULT_RECENCY_DECAY_DAYS,
        }
    }
}
