//! Question rows. Status is split into `status` + `canonical_id` columns.

use rusqlite::{params, Connection, OptionalExtension, Row};

use errorcache_core::errors::ErrorCacheResult;
use errorcache_core::models::{
    AgentId, ErrorCategory, Question, QuestionId, QuestionPriority, QuestionStatus,
};

use super::{fmt_ts, parse_label, parse_ts};
use crate::to_storage_err;

const COLUMNS: &str = "question_id, title, error_signature, raw_error, fingerprint, category,
    created_by, created_at, status, canonical_id, priority";

struct QuestionRow {
    question_id: String,
    title: String,
    error_signature: String,
    raw_error: String,
    fingerprint: String,
    category: String,
    created_by: String,
    created_at: String,
    status: String,
    canonical_id: Option<String>,
    priority: String,
}

impl QuestionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            question_id: row.get(0)?,
            title: row.get(1)?,
            error_signature: row.get(2)?,
            raw_error: row.get(3)?,
            fingerprint: row.get(4)?,
            category: row.get(5)?,
            created_by: row.get(6)?,
            created_at: row.get(7)?,
            status: row.get(8)?,
            canonical_id: row.get(9)?,
            priority: row.get(10)?,
        })
    }

    fn into_question(self) -> ErrorCacheResult<Question> {
        let status = match (self.status.as_str(), self.canonical_id) {
            ("open", _) => QuestionStatus::Open,
            ("duplicate", Some(canonical)) => QuestionStatus::Duplicate {
                canonical: QuestionId::from(canonical),
            },
            (other, _) => {
                return Err(to_storage_err(format!(
                    "question {}: bad status '{other}'",
                    self.question_id
                )))
            }
        };
        Ok(Question {
            question_id: QuestionId::from(self.question_id),
            title: self.title,
            error_signature: self.error_signature,
            raw_error: self.raw_error,
            fingerprint: self.fingerprint,
            category: parse_label::<ErrorCategory>("category", &self.category)?,
            created_by: AgentId::from(self.created_by),
            created_at: parse_ts(&self.created_at)?,
            status,
            priority: parse_label::<QuestionPriority>("priority", &self.priority)?,
        })
    }
}

fn status_columns(status: &QuestionStatus) -> (&'static str, Option<&str>) {
    match status {
        QuestionStatus::Open => ("open", None),
        QuestionStatus::Duplicate { canonical } => ("duplicate", Some(canonical.as_str())),
    }
}

pub fn insert_question(conn: &Connection, question: &Question) -> ErrorCacheResult<()> {
    let (status, canonical) = status_columns(&question.status);
    conn.execute(
        "INSERT INTO questions (
            question_id, title, error_signature, raw_error, fingerprint, category,
            created_by, created_at, status, canonical_id, priority
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            question.question_id.as_str(),
            question.title,
            question.error_signature,
            question.raw_error,
            question.fingerprint,
            question.category.as_str(),
            question.created_by.as_str(),
            fmt_ts(&question.created_at),
            status,
            canonical,
            question.priority.as_str(),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert question {}: {e}", question.question_id)))?;
    Ok(())
}

/// Write the moderation fields. Everything else is immutable.
pub fn update_moderation(conn: &Connection, question: &Question) -> ErrorCacheResult<()> {
    let (status, canonical) = status_columns(&question.status);
    let rows = conn
        .execute(
            "UPDATE questions SET status = ?2, canonical_id = ?3, priority = ?4
             WHERE question_id = ?1",
            params![
                question.question_id.as_str(),
                status,
                canonical,
                question.priority.as_str(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(to_storage_err(format!(
            "update question {}: no such row",
            question.question_id
        )));
    }
    Ok(())
}

pub fn get_question(
    conn: &Connection,
    question_id: &QuestionId,
) -> ErrorCacheResult<Option<Question>> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM questions WHERE question_id = ?1"),
            params![question_id.as_str()],
            QuestionRow::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(QuestionRow::into_question).transpose()
}

/// All questions, oldest first.
pub fn list_questions(conn: &Connection) -> ErrorCacheResult<Vec<Question>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {COLUMNS} FROM questions ORDER BY created_at, question_id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], QuestionRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?.into_question()?);
    }
    tracing::debug!(count = out.len(), "loaded questions");
    Ok(out)
}
