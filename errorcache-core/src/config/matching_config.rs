use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Similarity at or above which a submission attaches to an existing question.
    pub match_threshold: f64,
    /// Minimum similarity for a question to appear in search results.
    pub search_threshold: f64,
    /// Result count when the caller does not ask for one.
    pub default_search_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            match_threshold: defaults::DEFAULT_MATCH_THRESHOLD,
            search_threshold: defaults::DEFAULT_SEARCH_THRESHOLD,
            default_search_limit: defaults::DEFAULT_SEARCH_LIMIT,
        }
    }
}
