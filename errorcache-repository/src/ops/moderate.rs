use chrono::{DateTime, Utc};
use errorcache_core::errors::{ErrorCacheError, ErrorCacheResult};
use errorcache_core::models::{
    AgentIdentity, AuditEntry, AuditOperation, AuditOutcome, Operation, Question, QuestionId,
    QuestionPriority, QuestionStatus,
};
use errorcache_core::traits::IErrorCacheStorage;
use errorcache_observability::{events, moderation_span};
use serde_json::json;
use tracing::{debug, info, Instrument};

use super::question_not_found;
use crate::repository::{Attempt, Repository};

impl<S: IErrorCacheStorage> Repository<S> {
    /// Close `question_id` as a duplicate of `canonical_id`. Trusted only.
    ///
    /// The canonical side is resolved through its own duplicate chain; a chain
    /// that leads back to `question_id` is rejected. The question and the chain
    /// end are locked together, so concurrent opposing links cannot both pass.
    /// The closed question leaves the match index.
    pub async fn mark_duplicate(
        &self,
        identity: &AgentIdentity,
        question_id: &QuestionId,
        canonical_id: &QuestionId,
    ) -> ErrorCacheResult<Question> {
        let span = moderation_span!(identity.agent_id, question_id);
        async {
            let now = self.clock.now();
            let attempt = Attempt::new(AuditOperation::MarkDuplicate).about(question_id.as_str());
            match self
                .try_mark_duplicate(identity, question_id, canonical_id, now)
                .await
            {
                Ok(question) => {
                    self.metrics.record_duplicate();
                    Ok(question)
                }
                Err(e) => {
                    self.record_failure(identity, &attempt, &e, now).await;
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_mark_duplicate(
        &self,
        identity: &AgentIdentity,
        question_id: &QuestionId,
        canonical_id: &QuestionId,
        now: DateTime<Utc>,
    ) -> ErrorCacheResult<Question> {
        if question_id == canonical_id {
            return Err(ErrorCacheError::ValidationError(
                "a question cannot duplicate itself".into(),
            ));
        }

        let agent = {
            let _agent_guard = self.locks.agent(&identity.agent_id).await;
            let agent = self.resolve_agent(identity, now).await?;
            self.trust.authorize(&agent, Operation::CloseDuplicate)?;
            agent
        };

        // Hold the question and the end of the canonical chain. The chain end
        // may be closed while we wait, so resolve it again under the locks.
        let (canonical, _question_guards) = loop {
            let target = self.canonical_question(canonical_id).await?;
            let guards = self
                .locks
                .question_pair(question_id, &target.question_id)
                .await;
            let settled = self.canonical_question(canonical_id).await?;
            if settled.question_id == target.question_id {
                break (settled, guards);
            }
            debug!(question_id = %question_id, "canonical chain moved, retrying");
        };

        let mut question = self
            .storage
            .get_question(question_id)
            .await?
            .ok_or_else(|| question_not_found(question_id))?;
        if let Some(existing) = question.status.canonical() {
            return Err(ErrorCacheError::ValidationError(format!(
                "question {question_id} is already a duplicate of {existing}"
            )));
        }
        if canonical.question_id == *question_id {
            return Err(ErrorCacheError::ValidationError(format!(
                "question {canonical_id} already resolves to {question_id}"
            )));
        }

        question.status = QuestionStatus::Duplicate {
            canonical: canonical.question_id.clone(),
        };
        let audit = AuditEntry::new(
            agent.agent_id.clone(),
            AuditOperation::MarkDuplicate,
            AuditOutcome::Ok,
            now,
        )
        .with_entity(question_id.as_str())
        .with_details(json!({
            "canonical_id": canonical.question_id,
            "requested_canonical_id": canonical_id,
        }));
        self.storage.commit_question_update(&question, &audit).await?;

        self.index.remove(question_id);
        events::duplicate_marked(
            question_id.as_str(),
            canonical.question_id.as_str(),
            agent.agent_id.as_str(),
        );
        Ok(question)
    }

    /// Change a question's priority. Trusted only.
    pub async fn set_priority(
        &self,
        identity: &AgentIdentity,
        question_id: &QuestionId,
        priority: QuestionPriority,
    ) -> ErrorCacheResult<Question> {
        let span = moderation_span!(identity.agent_id, question_id);
        async {
            let now = self.clock.now();
            let attempt = Attempt::new(AuditOperation::SetPriority).about(question_id.as_str());
            match self.try_set_priority(identity, question_id, priority, now).await {
                Ok(question) => Ok(question),
                Err(e) => {
                    self.record_failure(identity, &attempt, &e, now).await;
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_set_priority(
        &self,
        identity: &AgentIdentity,
        question_id: &QuestionId,
        priority: QuestionPriority,
        now: DateTime<Utc>,
    ) -> ErrorCacheResult<Question> {
        let _question_guard = self.locks.question(question_id).await;
        let _agent_guard = self.locks.agent(&identity.agent_id).await;
        let agent = self.resolve_agent(identity, now).await?;
        self.trust.authorize(&agent, Operation::SetPriority)?;

        let mut question = self
            .storage
            .get_question(question_id)
            .await?
            .ok_or_else(|| question_not_found(question_id))?;
        let previous = question.priority;
        question.priority = priority;

        let audit = AuditEntry::new(
            agent.agent_id.clone(),
            AuditOperation::SetPriority,
            AuditOutcome::Ok,
            now,
        )
        .with_entity(question_id.as_str())
        .with_details(json!({
            "from": previous.as_str(),
            "to": priority.as_str(),
        }));
        self.storage.commit_question_update(&question, &audit).await?;

        info!(question_id = %question_id, from = %previous, to = %priority, "priority changed");
        Ok(question)
    }
}
