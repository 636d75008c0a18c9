use chrono::{DateTime, Utc};
use errorcache_core::config::ScoringConfig;

/// Recency factor: `floor + (1 − floor) × e^(−days / decay_days)`.
///
/// Range: `floor` – 1.0. A reference instant after `at` counts as zero days.
pub fn calculate(reference: DateTime<Utc>, at: DateTime<Utc>, config: &ScoringConfig) -> f64 {
    let days = (at - reference).num_seconds().max(0) as f64 / 86_400.0;
    let floor = config.recency_floor;
    floor + (1.0 - floor) * (-days / config.recency_decay_days).exp()
}
