use serde::{Deserialize, Serialize};

use super::defaults;

/// Promotion thresholds for the trust ladder.
///
/// Verifier has no numeric threshold: it only requires a human claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    pub contributor_min_verifications: u32,
    pub contributor_min_accuracy: f64,
    pub trusted_min_verifications: u32,
    pub trusted_min_accuracy: f64,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            contributor_min_verifications: defaults::DEFAULT_CONTRIBUTOR_MIN_VERIFICATIONS,
            contributor_min_accuracy: defaults::DEFAULT_CONTRIBUTOR_MIN_ACCURACY,
            trusted_min_verifications: defaults::DEFAULT_TRUSTED_MIN_VERIFICATIONS,
            trusted_min_accuracy: defaults::DEFAULT_TRUSTED_MIN_ACCURACY,
        }
    }
}
