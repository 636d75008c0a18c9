//! Answer rows. `commands` is a JSON array column.

use rusqlite::{params, Connection, OptionalExtension, Row};

use errorcache_core::errors::ErrorCacheResult;
use errorcache_core::models::{AgentId, Answer, AnswerId, QuestionId};

use super::{fmt_ts, parse_ts};
use crate::to_storage_err;

const COLUMNS: &str = "answer_id, question_id, owner_agent_id, root_cause, fix_approach,
    commands, created_at, current_score, score_updated_at, verification_count, pass_count";

struct AnswerRow {
    answer_id: String,
    question_id: String,
    owner_agent_id: String,
    root_cause: String,
    fix_approach: String,
    commands: String,
    created_at: String,
    current_score: f64,
    score_updated_at: String,
    verification_count: u32,
    pass_count: u32,
}

impl AnswerRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            answer_id: row.get(0)?,
            question_id: row.get(1)?,
            owner_agent_id: row.get(2)?,
            root_cause: row.get(3)?,
            fix_approach: row.get(4)?,
            commands: row.get(5)?,
            created_at: row.get(6)?,
            current_score: row.get(7)?,
            score_updated_at: row.get(8)?,
            verification_count: row.get(9)?,
            pass_count: row.get(10)?,
        })
    }

    fn into_answer(self) -> ErrorCacheResult<Answer> {
        let commands: Vec<String> = serde_json::from_str(&self.commands)
            .map_err(|e| to_storage_err(format!("parse commands of {}: {e}", self.answer_id)))?;
        Ok(Answer {
            answer_id: AnswerId::from(self.answer_id),
            question_id: QuestionId::from(self.question_id),
            owner_agent_id: AgentId::from(self.owner_agent_id),
            root_cause: self.root_cause,
            fix_approach: self.fix_approach,
            commands,
            created_at: parse_ts(&self.created_at)?,
            current_score: self.current_score,
            score_updated_at: parse_ts(&self.score_updated_at)?,
            verification_count: self.verification_count,
            pass_count: self.pass_count,
        })
    }
}

fn collect(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> ErrorCacheResult<Vec<Answer>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(args, AnswerRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?.into_answer()?);
    }
    Ok(out)
}

pub fn insert_answer(conn: &Connection, answer: &Answer) -> ErrorCacheResult<()> {
    let commands =
        serde_json::to_string(&answer.commands).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO answers (
            answer_id, question_id, owner_agent_id, root_cause, fix_approach, commands,
            created_at, current_score, score_updated_at, verification_count, pass_count
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            answer.answer_id.as_str(),
            answer.question_id.as_str(),
            answer.owner_agent_id.as_str(),
            answer.root_cause,
            answer.fix_approach,
            commands,
            fmt_ts(&answer.created_at),
            answer.current_score,
            fmt_ts(&answer.score_updated_at),
            answer.verification_count,
            answer.pass_count,
        ],
    )
    .map_err(|e| to_storage_err(format!("insert answer {}: {e}", answer.answer_id)))?;
    Ok(())
}

/// Write the derived fields: cached score and counters.
pub fn update_score(conn: &Connection, answer: &Answer) -> ErrorCacheResult<()> {
    let rows = conn
        .execute(
            "UPDATE answers SET current_score = ?2, score_updated_at = ?3,
                verification_count = ?4, pass_count = ?5
             WHERE answer_id = ?1",
            params![
                answer.answer_id.as_str(),
                answer.current_score,
                fmt_ts(&answer.score_updated_at),
                answer.verification_count,
                answer.pass_count,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if rows == 0 {
        return Err(to_storage_err(format!(
            "update answer {}: no such row",
            answer.answer_id
        )));
    }
    Ok(())
}

pub fn get_answer(conn: &Connection, answer_id: &AnswerId) -> ErrorCacheResult<Option<Answer>> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM answers WHERE answer_id = ?1"),
            params![answer_id.as_str()],
            AnswerRow::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(AnswerRow::into_answer).transpose()
}

pub fn answers_for_question(
    conn: &Connection,
    question_id: &QuestionId,
) -> ErrorCacheResult<Vec<Answer>> {
    collect(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM answers WHERE question_id = ?1 ORDER BY created_at, answer_id"
        ),
        &[&question_id.as_str()],
    )
}

pub fn list_answers(conn: &Connection) -> ErrorCacheResult<Vec<Answer>> {
    collect(
        conn,
        &format!("SELECT {COLUMNS} FROM answers ORDER BY created_at, answer_id"),
        &[],
    )
}
