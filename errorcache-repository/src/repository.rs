//! Repository: owns the in-memory state and the shared helpers every
//! operation uses (identity resolution, failure auditing, index refresh).

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use errorcache_core::config::ErrorCacheConfig;
use errorcache_core::errors::{ErrorCacheError, ErrorCacheResult};
use errorcache_core::models::{
    Agent, AgentIdentity, Answer, AuditEntry, AuditOperation, AuditOutcome, OperationClass,
    QuestionId,
};
use errorcache_core::traits::{Clock, IErrorCacheStorage};
use errorcache_matching::{AnswerScore, IndexEntry, MatchIndex};
use errorcache_observability::{events, EngineMetrics, MetricsSnapshot};
use errorcache_privacy::SecretScanner;
use errorcache_ratelimit::SlidingWindowLimiter;
use errorcache_scoring::ScoringEngine;
use errorcache_trust::TrustEngine;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::locks::EntityLocks;

/// The audit operation and entity a write attempt is about. Filled in as the
/// operation learns more, so a failure is audited as precisely as possible.
#[derive(Debug, Clone)]
pub(crate) struct Attempt {
    pub operation: AuditOperation,
    pub entity_id: Option<String>,
}

impl Attempt {
    pub fn new(operation: AuditOperation) -> Self {
        Self {
            operation,
            entity_id: None,
        }
    }

    pub fn about(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }
}

pub struct Repository<S> {
    pub(crate) storage: Arc<S>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) config: ErrorCacheConfig,
    pub(crate) trust: TrustEngine,
    pub(crate) scoring: ScoringEngine,
    pub(crate) limiter: SlidingWindowLimiter,
    pub(crate) scanner: SecretScanner,
    pub(crate) index: MatchIndex,
    pub(crate) locks: EntityLocks,
    pub(crate) metrics: EngineMetrics,
}

impl<S: IErrorCacheStorage> Repository<S> {
    /// Validate the configuration, then rebuild the match index and the rate
    /// windows from storage.
    #[instrument(skip_all)]
    pub async fn open(
        storage: Arc<S>,
        clock: Arc<dyn Clock>,
        config: ErrorCacheConfig,
    ) -> ErrorCacheResult<Self> {
        config.validate()?;
        let scanner = SecretScanner::from_config(&config.privacy)?;
        let repo = Self {
            trust: TrustEngine::new(&config.trust),
            scoring: ScoringEngine::new(&config.scoring),
            limiter: SlidingWindowLimiter::new(&config.rate_limit),
            index: MatchIndex::new(&config.matching, &config.scoring),
            scanner,
            locks: EntityLocks::default(),
            metrics: EngineMetrics::new(),
            storage,
            clock,
            config,
        };
        repo.rebuild_state().await?;
        Ok(repo)
    }

    pub fn config(&self) -> &ErrorCacheConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Open questions currently in the match index.
    pub fn indexed_questions(&self) -> usize {
        self.index.len()
    }

    /// Aged best-answer score the index ranks a question by, if indexed.
    pub fn indexed_score(&self, question_id: &QuestionId) -> Option<f64> {
        self.index.best_score(question_id, self.clock.now())
    }

    /// Drop expired rate windows and idle entity locks.
    pub fn prune_idle_state(&self) {
        self.limiter.prune(self.clock.now());
        let locks = self.locks.prune();
        debug!(locks, windows = self.limiter.window_count(), "idle state pruned");
    }

    /// Reload the match index and rate windows from storage.
    pub async fn rebuild_state(&self) -> ErrorCacheResult<()> {
        let now = self.clock.now();

        let questions = self.storage.list_questions().await?;
        let mut by_question: HashMap<QuestionId, Vec<Answer>> = HashMap::new();
        for answer in self.storage.list_answers().await? {
            by_question
                .entry(answer.question_id.clone())
                .or_default()
                .push(answer);
        }
        let entries: Vec<IndexEntry> = questions
            .iter()
            .filter(|q| q.status.is_open())
            .map(|q| {
                let answers = by_question.get(&q.question_id).map_or(&[][..], Vec::as_slice);
                IndexEntry::from_question(q, answers)
            })
            .collect();
        let indexed = entries.len();
        self.index.rebuild(entries);

        let longest = OperationClass::ALL
            .iter()
            .map(|c| self.limiter.limit_for(*c).window_secs)
            .max()
            .unwrap_or(0);
        let since = now - Duration::seconds(i64::try_from(longest).unwrap_or(i64::MAX));
        let rate_events: Vec<_> = self
            .storage
            .audit_since(since)
            .await?
            .into_iter()
            .filter(|e| e.outcome == AuditOutcome::Ok)
            .filter_map(|e| {
                e.operation
                    .rate_class()
                    .map(|class| (e.agent_id, class, e.timestamp))
            })
            .collect();
        let restored = rate_events.len();
        self.limiter.rebuild(rate_events, now);

        events::state_rebuilt(indexed, restored);
        Ok(())
    }

    /// Load the agent behind `identity`, registering it on first sight and
    /// writing back a changed claim flag. Call with the agent's lock held.
    pub(crate) async fn resolve_agent(
        &self,
        identity: &AgentIdentity,
        now: DateTime<Utc>,
    ) -> ErrorCacheResult<Agent> {
        let stored = self.storage.get_agent(&identity.agent_id).await?;
        let needs_write = match &stored {
            None => true,
            Some(agent) => agent.claimed_by_human != identity.claimed_by_human,
        };
        let mut agent = stored.unwrap_or_else(|| Agent::register(identity, now));
        agent.claimed_by_human = identity.claimed_by_human;
        let agent = self.trust.refresh(&agent);
        if needs_write {
            self.storage.upsert_agent(&agent).await?;
            debug!(agent_id = %agent.agent_id, level = %agent.trust_level, "agent record written");
        }
        Ok(agent)
    }

    /// Append the audit record of a failed write attempt and count it.
    pub(crate) async fn record_failure(
        &self,
        identity: &AgentIdentity,
        attempt: &Attempt,
        error: &ErrorCacheError,
        at: DateTime<Utc>,
    ) {
        match error {
            ErrorCacheError::RateLimited { class, retry_after } => {
                events::rate_limited(identity.agent_id.as_str(), *class, retry_after.as_secs());
            }
            ErrorCacheError::RejectedContent { field, pattern } => {
                events::content_rejected(identity.agent_id.as_str(), field, pattern);
            }
            _ => {}
        }
        self.metrics.record_failure(error);

        let mut entry = AuditEntry::new(
            identity.agent_id.clone(),
            attempt.operation,
            error.audit_outcome(),
            at,
        )
        .with_details(failure_details(error));
        entry.entity_id = attempt.entity_id.clone();
        if let Err(audit_err) = self.storage.append_audit(&entry).await {
            warn!(
                agent_id = %identity.agent_id,
                operation = %attempt.operation,
                error = %audit_err,
                "failed to append audit record"
            );
        }
    }

    /// Push one committed answer's cached score into the index. A newer
    /// version of the same answer's score already held there wins.
    pub(crate) fn index_answer(&self, answer: &Answer) {
        if !self.index.record_answer(&answer.question_id, AnswerScore::from(answer)) {
            debug!(
                answer_id = %answer.answer_id,
                question_id = %answer.question_id,
                "index update skipped"
            );
        }
    }
}

/// Audit details of a failure. Rejections name the field and pattern only.
fn failure_details(error: &ErrorCacheError) -> serde_json::Value {
    match error {
        ErrorCacheError::RateLimited { class, retry_after } => json!({
            "error_code": error.error_code(),
            "class": class.as_str(),
            "retry_after_secs": retry_after.as_secs(),
        }),
        ErrorCacheError::RejectedContent { field, pattern } => json!({
            "error_code": error.error_code(),
            "field": field,
            "pattern": pattern,
        }),
        _ => json!({
            "error_code": error.error_code(),
            "message": error.to_string(),
        }),
    }
}
