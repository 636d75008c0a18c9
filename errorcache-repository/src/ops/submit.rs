use chrono::{DateTime, Utc};
use errorcache_core::errors::ErrorCacheResult;
use errorcache_core::models::{
    AgentIdentity, Answer, AnswerId, AuditEntry, AuditOperation, AuditOutcome, Operation,
    OperationClass, Question, QuestionId, QuestionStatus,
};
use errorcache_core::traits::{IErrorCacheStorage, SubmissionCommit};
use errorcache_matching::{IndexEntry, Signature};
use errorcache_observability::{events, submission_span};
use serde_json::json;
use tracing::{debug, Instrument};

use crate::repository::{Attempt, Repository};
use crate::requests::{Submission, SubmissionReceipt};
use crate::validation::{clean_title, stored_error_text, submission_fields, validate_submission};

/// Where a submission's answer goes.
enum Target {
    Existing(Question),
    New(Question),
}

impl<S: IErrorCacheStorage> Repository<S> {
    /// Submit an error with its fix.
    ///
    /// Attaches to the named question (following duplicates), or to the open
    /// question whose signature matches, or opens a new question. Opening a
    /// question needs Contributor; attaching needs Verifier.
    pub async fn submit_question_answer(
        &self,
        identity: &AgentIdentity,
        submission: Submission,
    ) -> ErrorCacheResult<SubmissionReceipt> {
        let span = submission_span!(identity.agent_id);
        async {
            let now = self.clock.now();
            let mut attempt = Attempt::new(AuditOperation::SubmitSolution);
            match self.try_submit(identity, &submission, now, &mut attempt).await {
                Ok(receipt) => {
                    self.metrics.record_submission(receipt.created_question);
                    Ok(receipt)
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

    async fn try_submit(
        &self,
        identity: &AgentIdentity,
        submission: &Submission,
        now: DateTime<Utc>,
        attempt: &mut Attempt,
    ) -> ErrorCacheResult<SubmissionReceipt> {
        validate_submission(submission)?;
        let fields = submission_fields(submission);
        let named: Vec<(&str, &str)> = fields.iter().map(|(n, t)| (n.as_str(), *t)).collect();
        self.scanner.scan_fields(&named).into_result()?;

        let signature = Signature::from_error(&submission.error_text);
        let _signature_guard = self.locks.signature(&signature.fingerprint).await;
        let _agent_guard = self.locks.agent(&identity.agent_id).await;
        let agent = self.resolve_agent(identity, now).await?;

        let target = match &submission.question_id {
            Some(question_id) => Target::Existing(self.canonical_question(question_id).await?),
            None => match self.index.best_match(&signature, now) {
                Some(candidate) => match self.storage.get_question(&candidate.question_id).await? {
                    Some(question) if question.status.is_open() => Target::Existing(question),
                    _ => Target::New(self.new_question(submission, &signature, identity, now)),
                },
                None => Target::New(self.new_question(submission, &signature, identity, now)),
            },
        };

        let (operation, class) = match &target {
            Target::Existing(q) => {
                *attempt = Attempt::new(AuditOperation::SubmitAnswer).about(q.question_id.as_str());
                (Operation::SubmitAnswer, OperationClass::NewAnswer)
            }
            Target::New(_) => {
                *attempt = Attempt::new(AuditOperation::SubmitQuestion);
                (Operation::SubmitQuestion, OperationClass::NewQuestion)
            }
        };
        self.trust.authorize(&agent, operation)?;
        let slot = self
            .limiter
            .check_and_record(&agent.agent_id, class, now)
            .into_result(class)?;

        let (question, created_question) = match target {
            Target::Existing(q) => (q, false),
            Target::New(q) => (q, true),
        };
        let answer = Answer {
            answer_id: AnswerId::new(),
            question_id: question.question_id.clone(),
            owner_agent_id: agent.agent_id.clone(),
            root_cause: submission.root_cause.trim().to_string(),
            fix_approach: submission.fix_approach.trim().to_string(),
            commands: submission.commands.iter().map(|c| c.trim().to_string()).collect(),
            created_at: now,
            current_score: 0.0,
            score_updated_at: now,
            verification_count: 0,
            pass_count: 0,
        };
        let audit = AuditEntry::new(agent.agent_id.clone(), attempt.operation, AuditOutcome::Ok, now)
            .with_entity(answer.answer_id.as_str())
            .with_details(json!({
                "question_id": question.question_id,
                "created_question": created_question,
            }));

        let commit = SubmissionCommit {
            question: created_question.then_some(&question),
            answer: &answer,
            audit: &audit,
        };
        if let Err(e) = self.storage.commit_submission(commit).await {
            self.limiter.release(&agent.agent_id, class, slot.recorded_at);
            return Err(e);
        }

        if created_question {
            self.index
                .upsert(IndexEntry::from_question(&question, std::slice::from_ref(&answer)));
            events::question_created(
                question.question_id.as_str(),
                agent.agent_id.as_str(),
                question.category.as_str(),
            );
        } else {
            self.index_answer(&answer);
        }
        events::answer_submitted(
            answer.answer_id.as_str(),
            question.question_id.as_str(),
            agent.agent_id.as_str(),
        );
        debug!(remaining = slot.remaining, %class, "submission rate slot used");

        Ok(SubmissionReceipt {
            question,
            answer,
            created_question,
        })
    }

    fn new_question(
        &self,
        submission: &Submission,
        signature: &Signature,
        identity: &AgentIdentity,
        now: DateTime<Utc>,
    ) -> Question {
        Question {
            question_id: QuestionId::new(),
            title: clean_title(&submission.title),
            error_signature: signature.normalized.clone(),
            raw_error: stored_error_text(&submission.error_text),
            fingerprint: signature.fingerprint.clone(),
            category: submission.category,
            created_by: identity.agent_id.clone(),
            created_at: now,
            status: QuestionStatus::Open,
            priority: Default::default(),
        }
    }
}
