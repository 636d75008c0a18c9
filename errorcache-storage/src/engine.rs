//! StorageEngine: owns the connections, runs migrations, implements
//! `IErrorCacheStorage`.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use tracing::debug;

use errorcache_core::config::StorageConfig;
use errorcache_core::errors::ErrorCacheResult;
use errorcache_core::models::{
    Agent, AgentId, Answer, AnswerId, AuditEntry, Question, QuestionId, Verification,
};
use errorcache_core::traits::{IErrorCacheStorage, SubmissionCommit, VerificationCommit};

use crate::migrations;
use crate::pool::{ReadPool, Writer};
use crate::queries::{agent_ops, answer_ops, audit_ops, question_ops, verification_ops};

pub struct StorageEngine {
    writer: Writer,
    /// `None` in in-memory mode: a second in-memory connection would be a
    /// separate database, so reads go through the writer.
    readers: Option<ReadPool>,
}

impl StorageEngine {
    /// Open (or create) a file-backed database and bring its schema up to date.
    pub fn open(config: &StorageConfig) -> ErrorCacheResult<Self> {
        Self::open_path(&config.db_path, config.read_pool_size, config.busy_timeout_ms)
    }

    pub fn open_path(
        path: &Path,
        read_pool_size: usize,
        busy_timeout_ms: u64,
    ) -> ErrorCacheResult<Self> {
        let writer = Writer::open(path, busy_timeout_ms)?;
        writer.run_now(migrations::run_migrations)?;
        // Readers open after migrations so the WAL files already exist.
        let readers = ReadPool::open(path, read_pool_size, busy_timeout_ms)?;
        debug!(path = %path.display(), readers = readers.reader_count(), "storage opened");
        Ok(Self {
            writer,
            readers: Some(readers),
        })
    }

    pub fn open_in_memory() -> ErrorCacheResult<Self> {
        let writer = Writer::open_in_memory()?;
        writer.run_now(migrations::run_migrations)?;
        Ok(Self {
            writer,
            readers: None,
        })
    }

    pub fn schema_version(&self) -> ErrorCacheResult<u32> {
        self.writer.run_now(migrations::current_version)
    }

    async fn with_reader<F, T>(&self, f: F) -> ErrorCacheResult<T>
    where
        F: FnOnce(&Connection) -> ErrorCacheResult<T>,
    {
        match &self.readers {
            Some(pool) => pool.read(f),
            None => self.writer.run(f).await,
        }
    }

    async fn in_transaction<F>(&self, label: &'static str, f: F) -> ErrorCacheResult<()>
    where
        F: FnOnce(&Connection) -> ErrorCacheResult<()>,
    {
        self.writer.transaction(label, f).await
    }
}

impl IErrorCacheStorage for StorageEngine {
    async fn get_agent(&self, agent_id: &AgentId) -> ErrorCacheResult<Option<Agent>> {
        self.with_reader(|conn| agent_ops::get_agent(conn, agent_id))
            .await
    }

    async fn upsert_agent(&self, agent: &Agent) -> ErrorCacheResult<()> {
        self.writer
            .run(|conn| agent_ops::upsert_agent(conn, agent))
            .await
    }

    async fn get_question(&self, question_id: &QuestionId) -> ErrorCacheResult<Option<Question>> {
        self.with_reader(|conn| question_ops::get_question(conn, question_id))
            .await
    }

    async fn list_questions(&self) -> ErrorCacheResult<Vec<Question>> {
        self.with_reader(question_ops::list_questions).await
    }

    async fn get_answer(&self, answer_id: &AnswerId) -> ErrorCacheResult<Option<Answer>> {
        self.with_reader(|conn| answer_ops::get_answer(conn, answer_id))
            .await
    }

    async fn answers_for_question(
        &self,
        question_id: &QuestionId,
    ) -> ErrorCacheResult<Vec<Answer>> {
        self.with_reader(|conn| answer_ops::answers_for_question(conn, question_id))
            .await
    }

    async fn list_answers(&self) -> ErrorCacheResult<Vec<Answer>> {
        self.with_reader(answer_ops::list_answers).await
    }

    async fn verifications_for_answer(
        &self,
        answer_id: &AnswerId,
    ) -> ErrorCacheResult<Vec<Verification>> {
        self.with_reader(|conn| verification_ops::verifications_for_answer(conn, answer_id))
            .await
    }

    async fn commit_submission(&self, commit: SubmissionCommit<'_>) -> ErrorCacheResult<()> {
        self.in_transaction("commit_submission", |conn| {
            if let Some(question) = commit.question {
                question_ops::insert_question(conn, question)?;
            }
            answer_ops::insert_answer(conn, commit.answer)?;
            audit_ops::insert_audit_entry(conn, commit.audit)
        })
        .await?;
        debug!(
            answer_id = %commit.answer.answer_id,
            new_question = commit.question.is_some(),
            "submission committed"
        );
        Ok(())
    }

    async fn commit_verification(&self, commit: VerificationCommit<'_>) -> ErrorCacheResult<()> {
        self.in_transaction("commit_verification", |conn| {
            verification_ops::insert_verification(conn, commit.verification)?;
            answer_ops::update_score(conn, commit.answer)?;
            agent_ops::upsert_agent(conn, commit.agent)?;
            audit_ops::insert_audit_entry(conn, commit.audit)
        })
        .await?;
        debug!(verification_id = %commit.verification.verification_id, "verification committed");
        Ok(())
    }

    async fn commit_question_update(
        &self,
        question: &Question,
        audit: &AuditEntry,
    ) -> ErrorCacheResult<()> {
        self.in_transaction("commit_question_update", |conn| {
            question_ops::update_moderation(conn, question)?;
            audit_ops::insert_audit_entry(conn, audit)
        })
        .await
    }

    async fn append_audit(&self, entry: &AuditEntry) -> ErrorCacheResult<()> {
        self.writer
            .run(|conn| audit_ops::insert_audit_entry(conn, entry))
            .await
    }

    async fn audit_since(&self, since: DateTime<Utc>) -> ErrorCacheResult<Vec<AuditEntry>> {
        self.with_reader(|conn| audit_ops::audit_since(conn, since))
            .await
    }

    async fn audit_for_agent(&self, agent_id: &AgentId) -> ErrorCacheResult<Vec<AuditEntry>> {
        self.with_reader(|conn| audit_ops::audit_for_agent(conn, agent_id))
            .await
    }
}
