use std::future::Future;

use chrono::{DateTime, Utc};

use crate::errors::ErrorCacheResult;
use crate::models::{
    Agent, AgentId, Answer, AnswerId, AuditEntry, Question, QuestionId, Verification,
};

/// Entities written by one successful submission.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionCommit<'a> {
    /// Present when the submission opened a new question.
    pub question: Option<&'a Question>,
    pub answer: &'a Answer,
    pub audit: &'a AuditEntry,
}

/// Entities written by one successful verification.
#[derive(Debug, Clone, Copy)]
pub struct VerificationCommit<'a> {
    pub verification: &'a Verification,
    /// The answer with its recomputed score and counters.
    pub answer: &'a Answer,
    /// The verifier with updated trust stats.
    pub agent: &'a Agent,
    pub audit: &'a AuditEntry,
}

/// Persistence collaborator.
///
/// Every `commit_*` method is all-or-nothing: either every row it names is
/// written together with its audit entry, or nothing is.
pub trait IErrorCacheStorage: Send + Sync {
    // --- Agents ---
    fn get_agent(
        &self,
        agent_id: &AgentId,
    ) -> impl Future<Output = ErrorCacheResult<Option<Agent>>> + Send;
    fn upsert_agent(&self, agent: &Agent) -> impl Future<Output = ErrorCacheResult<()>> + Send;

    // --- Questions ---
    fn get_question(
        &self,
        question_id: &QuestionId,
    ) -> impl Future<Output = ErrorCacheResult<Option<Question>>> + Send;
    fn list_questions(&self) -> impl Future<Output = ErrorCacheResult<Vec<Question>>> + Send;

    // --- Answers ---
    fn get_answer(
        &self,
        answer_id: &AnswerId,
    ) -> impl Future<Output = ErrorCacheResult<Option<Answer>>> + Send;
    fn answers_for_question(
        &self,
        question_id: &QuestionId,
    ) -> impl Future<Output = ErrorCacheResult<Vec<Answer>>> + Send;
    fn list_answers(&self) -> impl Future<Output = ErrorCacheResult<Vec<Answer>>> + Send;

    // --- Verifications ---
    /// Verifications of one answer ordered by `created_at`, then id.
    fn verifications_for_answer(
        &self,
        answer_id: &AnswerId,
    ) -> impl Future<Output = ErrorCacheResult<Vec<Verification>>> + Send;

    // --- Atomic commits ---
    fn commit_submission(
        &self,
        commit: SubmissionCommit<'_>,
    ) -> impl Future<Output = ErrorCacheResult<()>> + Send;
    fn commit_verification(
        &self,
        commit: VerificationCommit<'_>,
    ) -> impl Future<Output = ErrorCacheResult<()>> + Send;
    /// Persist a moderation change (status or priority) with its audit entry.
    fn commit_question_update(
        &self,
        question: &Question,
        audit: &AuditEntry,
    ) -> impl Future<Output = ErrorCacheResult<()>> + Send;

    // --- Audit ---
    /// Standalone audit entry for a write attempt that changed nothing.
    fn append_audit(&self, entry: &AuditEntry)
        -> impl Future<Output = ErrorCacheResult<()>> + Send;
    /// Entries with `timestamp >= since`, oldest first.
    fn audit_since(
        &self,
        since: DateTime<Utc>,
    ) -> impl Future<Output = ErrorCacheResult<Vec<AuditEntry>>> + Send;
    /// All entries for one agent, oldest first.
    fn audit_for_agent(
        &self,
        agent_id: &AgentId,
    ) -> impl Future<Output = ErrorCacheResult<Vec<AuditEntry>>> + Send;
}
