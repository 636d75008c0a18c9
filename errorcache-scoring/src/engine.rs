use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use errorcache_core::config::ScoringConfig;
use errorcache_core::models::{Answer, Verification};

use crate::factors::recency;
use crate::formula::{compute_breakdown, ScoreBreakdown};

/// Scores answers with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `answer` from its full verification list, evaluated at `at`.
    pub fn score(
        &self,
        answer: &Answer,
        verifications: &[Verification],
        at: DateTime<Utc>,
    ) -> ScoreBreakdown {
        compute_breakdown(answer.created_at, verifications, at, &self.config)
    }

    /// Re-derive the cached score at its own `score_updated_at`.
    pub fn rederive(&self, answer: &Answer, verifications: &[Verification]) -> f64 {
        self.score(answer, verifications, answer.score_updated_at)
            .final_score
    }

    /// A cached score taken at `scored_at`, aged to `now`.
    ///
    /// Cached scores are taken when their newest verification lands, so the
    /// recency factor baked into them is 1.0 and decay starts at `scored_at`.
    pub fn decayed(&self, score: f64, scored_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        score * recency::calculate(scored_at, now, &self.config)
    }

    /// The answer's score as of `now`.
    pub fn effective_score(&self, answer: &Answer, now: DateTime<Utc>) -> f64 {
        self.decayed(answer.current_score, answer.score_updated_at, now)
    }

    /// Best-first ordering at `now`: effective score desc, then earliest
    /// `created_at`, then `answer_id`.
    pub fn compare_at(&self, a: &Answer, b: &Answer, now: DateTime<Utc>) -> Ordering {
        self.effective_score(b, now)
            .total_cmp(&self.effective_score(a, now))
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.answer_id.cmp(&b.answer_id))
    }

    pub fn best_answer<'a>(&self, answers: &'a [Answer], now: DateTime<Utc>) -> Option<&'a Answer> {
        answers.iter().min_by(|a, b| self.compare_at(a, b, now))
    }

    /// Sort `answers` best first as of `now`.
    pub fn rank(&self, answers: &mut [Answer], now: DateTime<Utc>) {
        answers.sort_by(|a, b| self.compare_at(a, b, now));
    }
}
