use chrono::{DateTime, Utc};
use errorcache_core::config::ScoringConfig;
use errorcache_core::models::{Verification, VerificationId};
use serde::Serialize;

use crate::factors;

/// One verification's share of the weighted sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub verification_id: VerificationId,
    pub tier_weight: f64,
    pub owner_uniqueness: f64,
    pub outcome_weight: f64,
    pub value: f64,
}

/// Every factor of a score, for debugging and audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub recency: f64,
    pub weighted_sum: f64,
    pub env_diversity: f64,
    pub distinct_environments: usize,
    pub contributions: Vec<Contribution>,
    pub final_score: f64,
}

/// Score of an answer created at `created_at` with `verifications`, evaluated at `at`.
pub fn compute(
    created_at: DateTime<Utc>,
    verifications: &[Verification],
    at: DateTime<Utc>,
    config: &ScoringConfig,
) -> f64 {
    compute_breakdown(created_at, verifications, at, config).final_score
}

/// Compute the score with a full breakdown of each factor.
pub fn compute_breakdown(
    created_at: DateTime<Utc>,
    verifications: &[Verification],
    at: DateTime<Utc>,
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let mut ordered: Vec<&Verification> = verifications.iter().collect();
    ordered.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.verification_id.cmp(&b.verification_id))
    });

    let reference = ordered.last().map_or(created_at, |v| v.created_at);
    let recency = factors::recency::calculate(reference, at, config);

    let uniqueness = factors::uniqueness::multipliers(&ordered, config);
    let contributions: Vec<Contribution> = ordered
        .iter()
        .zip(uniqueness)
        .map(|(v, owner_uniqueness)| {
            let tier_weight = factors::tier::weight(v.tier, config);
            let outcome_weight = factors::outcome::weight(v.outcome, config);
            Contribution {
                verification_id: v.verification_id.clone(),
                tier_weight,
                owner_uniqueness,
                outcome_weight,
                value: tier_weight * owner_uniqueness * outcome_weight,
            }
        })
        .collect();
    let weighted_sum: f64 = contributions.iter().map(|c| c.value).sum();

    let positive_envs = ordered
        .iter()
        .filter(|v| factors::outcome::weight(v.outcome, config) > 0.0)
        .map(|v| v.environment.as_str());
    let (env_diversity, distinct_environments) = factors::diversity::calculate(positive_envs, config);

    let final_score = if ordered.is_empty() {
        0.0
    } else {
        recency * weighted_sum * env_diversity
    };

    ScoreBreakdown {
        recency,
        weighted_sum,
        env_diversity,
        distinct_environments,
        contributions,
        final_score,
    }
}
