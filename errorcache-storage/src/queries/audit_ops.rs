//! Append-only audit log.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use errorcache_core::errors::ErrorCacheResult;
use errorcache_core::models::{AgentId, AuditEntry, AuditOperation, AuditOutcome};

use super::{fmt_ts, parse_label, parse_ts};
use crate::to_storage_err;

struct AuditRow {
    agent_id: String,
    operation: String,
    entity_id: Option<String>,
    outcome: String,
    details: String,
    timestamp: String,
}

impl AuditRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            agent_id: row.get(0)?,
            operation: row.get(1)?,
            entity_id: row.get(2)?,
            outcome: row.get(3)?,
            details: row.get(4)?,
            timestamp: row.get(5)?,
        })
    }

    fn into_entry(self) -> ErrorCacheResult<AuditEntry> {
        Ok(AuditEntry {
            agent_id: AgentId::from(self.agent_id),
            operation: parse_label::<AuditOperation>("operation", &self.operation)?,
            entity_id: self.entity_id,
            outcome: parse_label::<AuditOutcome>("outcome", &self.outcome)?,
            details: serde_json::from_str(&self.details)
                .map_err(|e| to_storage_err(format!("parse audit details: {e}")))?,
            timestamp: parse_ts(&self.timestamp)?,
        })
    }
}

pub fn insert_audit_entry(conn: &Connection, entry: &AuditEntry) -> ErrorCacheResult<()> {
    let details =
        serde_json::to_string(&entry.details).map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO audit_log (agent_id, operation, entity_id, outcome, details, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            entry.agent_id.as_str(),
            entry.operation.as_str(),
            entry.entity_id,
            entry.outcome.as_str(),
            details,
            fmt_ts(&entry.timestamp),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

fn query(conn: &Connection, sql: &str, arg: &str) -> ErrorCacheResult<Vec<AuditEntry>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![arg], AuditRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?.into_entry()?);
    }
    Ok(out)
}

/// Entries at or after `since`, in insertion order.
pub fn audit_since(conn: &Connection, since: DateTime<Utc>) -> ErrorCacheResult<Vec<AuditEntry>> {
    query(
        conn,
        "SELECT agent_id, operation, entity_id, outcome, details, timestamp
         FROM audit_log WHERE timestamp >= ?1 ORDER BY timestamp, id",
        &fmt_ts(&since),
    )
}

pub fn audit_for_agent(conn: &Connection, agent_id: &AgentId) -> ErrorCacheResult<Vec<AuditEntry>> {
    query(
        conn,
        "SELECT agent_id, operation, entity_id, outcome, details, timestamp
         FROM audit_log WHERE agent_id = ?1 ORDER BY timestamp, id",
        agent_id.as_str(),
    )
}
