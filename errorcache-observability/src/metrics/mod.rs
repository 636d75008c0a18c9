//! Engine counters. Lock-free; read through a serializable snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

use errorcache_core::errors::ErrorCacheError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
pub struct EngineMetrics {
    searches: AtomicU64,
    questions_created: AtomicU64,
    answers_submitted: AtomicU64,
    verifications_recorded: AtomicU64,
    duplicates_marked: AtomicU64,
    promotions: AtomicU64,
    demotions: AtomicU64,
    unauthorized: AtomicU64,
    rate_limited: AtomicU64,
    rejected_content: AtomicU64,
    not_found: AtomicU64,
    validation_errors: AtomicU64,
    storage_errors: AtomicU64,
}

/// Point-in-time copy of [`EngineMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub searches: u64,
    pub questions_created: u64,
    pub answers_submitted: u64,
    pub verifications_recorded: u64,
    pub duplicates_marked: u64,
    pub promotions: u64,
    pub demotions: u64,
    pub unauthorized: u64,
    pub rate_limited: u64,
    pub rejected_content: u64,
    pub not_found: u64,
    pub validation_errors: u64,
    pub storage_errors: u64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_search(&self) {
        bump(&self.searches);
    }

    /// A successful submission; `created_question` when it opened a new question.
    pub fn record_submission(&self, created_question: bool) {
        if created_question {
            bump(&self.questions_created);
        }
        bump(&self.answers_submitted);
    }

    pub fn record_verification(&self) {
        bump(&self.verifications_recorded);
    }

    pub fn record_duplicate(&self) {
        bump(&self.duplicates_marked);
    }

    pub fn record_trust_change(&self, promoted: bool) {
        if promoted {
            bump(&self.promotions);
        } else {
            bump(&self.demotions);
        }
    }

    /// Count a failed operation under its error class.
    pub fn record_failure(&self, error: &ErrorCacheError) {
        let counter = match error {
            ErrorCacheError::Unauthorized { .. } => &self.unauthorized,
            ErrorCacheError::RateLimited { .. } => &self.rate_limited,
            ErrorCacheError::RejectedContent { .. } => &self.rejected_content,
            ErrorCacheError::NotFound { .. } => &self.not_found,
            ErrorCacheError::ValidationError(_) | ErrorCacheError::ConfigError(_) => {
                &self.validation_errors
            }
            ErrorCacheError::StorageError(_) => &self.storage_errors,
        };
        bump(counter);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        MetricsSnapshot {
            searches: load(&self.searches),
            questions_created: load(&self.questions_created),
            answers_submitted: load(&self.answers_submitted),
            verifications_recorded: load(&self.verifications_recorded),
            duplicates_marked: load(&self.duplicates_marked),
            promotions: load(&self.promotions),
            demotions: load(&self.demotions),
            unauthorized: load(&self.unauthorized),
            rate_limited: load(&self.rate_limited),
            rejected_content: load(&self.rejected_content),
            not_found: load(&self.not_found),
            validation_errors: load(&self.validation_errors),
            storage_errors: load(&self.storage_errors),
        }
    }
}
