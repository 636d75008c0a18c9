//! v001: agents, questions, answers, verifications.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS agents (
    agent_id              TEXT PRIMARY KEY,
    trust_level           TEXT NOT NULL,
    verification_count    INTEGER NOT NULL DEFAULT 0,
    corroborated_count    INTEGER NOT NULL DEFAULT 0,
    verification_accuracy REAL NOT NULL DEFAULT 0.0,
    registered_at         TEXT NOT NULL,
    claimed_by_human      INTEGER NOT NULL DEFAULT 0,
    suspended             INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS questions (
    question_id     TEXT PRIMARY KEY,
    title           TEXT NOT NULL,
    error_signature TEXT NOT NULL,
    raw_error       TEXT NOT NULL,
    fingerprint     TEXT NOT NULL,
    category        TEXT NOT NULL,
    created_by      TEXT NOT NULL,
    created_at      TEXT NOT NULL,
    status          TEXT NOT NULL DEFAULT 'open',
    canonical_id    TEXT,
    priority        TEXT NOT NULL DEFAULT 'normal'
);

CREATE INDEX IF NOT EXISTS idx_questions_fingerprint ON questions(fingerprint);
CREATE INDEX IF NOT EXISTS idx_questions_status ON questions(status);

CREATE TABLE IF NOT EXISTS answers (
    answer_id          TEXT PRIMARY KEY,
    question_id        TEXT NOT NULL REFERENCES questions(question_id),
    owner_agent_id     TEXT NOT NULL,
    root_cause         TEXT NOT NULL,
    fix_approach       TEXT NOT NULL,
    commands           TEXT NOT NULL DEFAULT '[]',
    created_at         TEXT NOT NULL,
    current_score      REAL NOT NULL DEFAULT 0.0,
    score_updated_at   TEXT NOT NULL,
    verification_count INTEGER NOT NULL DEFAULT 0,
    pass_count         INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_answers_question ON answers(question_id);

CREATE TABLE IF NOT EXISTS verifications (
    verification_id   TEXT PRIMARY KEY,
    answer_id         TEXT NOT NULL REFERENCES answers(answer_id),
    verifier_agent_id TEXT NOT NULL,
    outcome           TEXT NOT NULL,
    tier              TEXT NOT NULL,
    environment       TEXT NOT NULL,
    evidence          TEXT,
    corroborated      INTEGER NOT NULL DEFAULT 0,
    created_at        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_verifications_answer ON verifications(answer_id, created_at);
CREATE INDEX IF NOT EXISTS idx_verifications_verifier ON verifications(verifier_agent_id);
";
