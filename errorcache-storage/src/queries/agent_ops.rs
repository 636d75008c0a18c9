//! Agent rows.

use rusqlite::{params, Connection, OptionalExtension, Row};

use errorcache_core::errors::ErrorCacheResult;
use errorcache_core::models::{Agent, AgentId, TrustLevel};

use super::{fmt_ts, parse_label, parse_ts};
use crate::to_storage_err;

const COLUMNS: &str = "agent_id, trust_level, verification_count, corroborated_count,
    verification_accuracy, registered_at, claimed_by_human, suspended";

struct AgentRow {
    agent_id: String,
    trust_level: String,
    verification_count: u32,
    corroborated_count: u32,
    verification_accuracy: f64,
    registered_at: String,
    claimed_by_human: bool,
    suspended: bool,
}

impl AgentRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            agent_id: row.get(0)?,
            trust_level: row.get(1)?,
            verification_count: row.get(2)?,
            corroborated_count: row.get(3)?,
            verification_accuracy: row.get(4)?,
            registered_at: row.get(5)?,
            claimed_by_human: row.get(6)?,
            suspended: row.get(7)?,
        })
    }

    fn into_agent(self) -> ErrorCacheResult<Agent> {
        Ok(Agent {
            agent_id: AgentId::from(self.agent_id),
            trust_level: parse_label::<TrustLevel>("trust_level", &self.trust_level)?,
            verification_count: self.verification_count,
            corroborated_count: self.corroborated_count,
            verification_accuracy: self.verification_accuracy,
            registered_at: parse_ts(&self.registered_at)?,
            claimed_by_human: self.claimed_by_human,
            suspended: self.suspended,
        })
    }
}

pub fn get_agent(conn: &Connection, agent_id: &AgentId) -> ErrorCacheResult<Option<Agent>> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM agents WHERE agent_id = ?1"),
            params![agent_id.as_str()],
            AgentRow::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(AgentRow::into_agent).transpose()
}

/// Insert or overwrite an agent. `registered_at` is kept from the first insert.
pub fn upsert_agent(conn: &Connection, agent: &Agent) -> ErrorCacheResult<()> {
    conn.execute(
        "INSERT INTO agents (
            agent_id, trust_level, verification_count, corroborated_count,
            verification_accuracy, registered_at, claimed_by_human, suspended
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(agent_id) DO UPDATE SET
            trust_level = excluded.trust_level,
            verification_count = excluded.verification_count,
            corroborated_count = excluded.corroborated_count,
            verification_accuracy = excluded.verification_accuracy,
            claimed_by_human = excluded.claimed_by_human,
            suspended = excluded.suspended",
        params![
            agent.agent_id.as_str(),
            agent.trust_level.as_str(),
            agent.verification_count,
            agent.corroborated_count,
            agent.verification_accuracy,
            fmt_ts(&agent.registered_at),
            agent.claimed_by_human,
            agent.suspended,
        ],
    )
    .map_err(|e| to_storage_err(format!("upsert agent {}: {e}", agent.agent_id)))?;
    Ok(())
}
