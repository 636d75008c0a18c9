//! Verification rows. Insert-only.

use rusqlite::{params, Connection, Row};

use errorcache_core::errors::ErrorCacheResult;
use errorcache_core::models::{
    AgentId, AnswerId, Evidence, Verification, VerificationId, VerificationOutcome,
    VerificationTier,
};

use super::{fmt_ts, parse_label, parse_ts};
use crate::to_storage_err;

struct VerificationRow {
    verification_id: String,
    answer_id: String,
    verifier_agent_id: String,
    outcome: String,
    tier: String,
    environment: String,
    evidence: Option<String>,
    corroborated: bool,
    created_at: String,
}

impl VerificationRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            verification_id: row.get(0)?,
            answer_id: row.get(1)?,
            verifier_agent_id: row.get(2)?,
            outcome: row.get(3)?,
            tier: row.get(4)?,
            environment: row.get(5)?,
            evidence: row.get(6)?,
            corroborated: row.get(7)?,
            created_at: row.get(8)?,
        })
    }

    fn into_verification(self) -> ErrorCacheResult<Verification> {
        let evidence = self
            .evidence
            .as_deref()
            .map(serde_json::from_str::<Evidence>)
            .transpose()
            .map_err(|e| {
                to_storage_err(format!("parse evidence of {}: {e}", self.verification_id))
            })?;
        Ok(Verification {
            verification_id: VerificationId::from(self.verification_id),
            answer_id: AnswerId::from(self.answer_id),
            verifier_agent_id: AgentId::from(self.verifier_agent_id),
            outcome: parse_label::<VerificationOutcome>("outcome", &self.outcome)?,
            tier: parse_label::<VerificationTier>("tier", &self.tier)?,
            environment: self.environment,
            evidence,
            corroborated: self.corroborated,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

pub fn insert_verification(conn: &Connection, v: &Verification) -> ErrorCacheResult<()> {
    let evidence = v
        .evidence
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO verifications (
            verification_id, answer_id, verifier_agent_id, outcome, tier,
            environment, evidence, corroborated, created_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            v.verification_id.as_str(),
            v.answer_id.as_str(),
            v.verifier_agent_id.as_str(),
            v.outcome.as_str(),
            v.tier.as_str(),
            v.environment,
            evidence,
            v.corroborated,
            fmt_ts(&v.created_at),
        ],
    )
    .map_err(|e| to_storage_err(format!("insert verification {}: {e}", v.verification_id)))?;
    Ok(())
}

/// Verifications of one answer, oldest first (ties by id).
pub fn verifications_for_answer(
    conn: &Connection,
    answer_id: &AnswerId,
) -> ErrorCacheResult<Vec<Verification>> {
    let mut stmt = conn
        .prepare(
            "SELECT verification_id, answer_id, verifier_agent_id, outcome, tier,
                    environment, evidence, corroborated, created_at
             FROM verifications WHERE answer_id = ?1
             ORDER BY created_at, verification_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![answer_id.as_str()], VerificationRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(
            row.map_err(|e| to_storage_err(e.to_string()))?
                .into_verification()?,
        );
    }
    Ok(out)
}
