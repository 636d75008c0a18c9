//! v002: append-only audit log. One row per write attempt.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS audit_log (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    agent_id   TEXT NOT NULL,
    operation  TEXT NOT NULL,
    entity_id  TEXT,
    outcome    TEXT NOT NULL,
    details    TEXT NOT NULL DEFAULT 'null',
    timestamp  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_audit_agent ON audit_log(agent_id);
CREATE INDEX IF NOT EXISTS idx_audit_timestamp ON audit_log(timestamp);
CREATE INDEX IF NOT EXISTS idx_audit_outcome ON audit_log(outcome);
";
