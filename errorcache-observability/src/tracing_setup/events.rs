//! Structured log events for key engine operations.
//!
//! Each function emits one `tracing` event with an `event` field naming it.

use errorcache_core::models::{OperationClass, TrustLevel};

pub fn question_created(question_id: &str, agent_id: &str, category: &str) {
    tracing::info!(
        event = "question_created",
        question_id = %question_id,
        agent_id = %agent_id,
        category = %category,
        "question created"
    );
}

pub fn answer_submitted(answer_id: &str, question_id: &str, agent_id: &str) {
    tracing::info!(
        event = "answer_submitted",
        answer_id = %answer_id,
        question_id = %question_id,
        agent_id = %agent_id,
        "answer submitted"
    );
}

pub fn verification_recorded(answer_id: &str, agent_id: &str, outcome: &str, score: f64) {
    tracing::info!(
        event = "verification_recorded",
        answer_id = %answer_id,
        agent_id = %agent_id,
        outcome = %outcome,
        score = score,
        "verification recorded"
    );
}

/// Log a promotion or demotion.
pub fn trust_changed(agent_id: &str, from: TrustLevel, to: TrustLevel) {
    tracing::info!(
        event = "trust_changed",
        agent_id = %agent_id,
        from = %from,
        to = %to,
        "trust level changed"
    );
}

pub fn rate_limited(agent_id: &str, class: OperationClass, retry_after_secs: u64) {
    tracing::warn!(
        event = "rate_limited",
        agent_id = %agent_id,
        class = %class,
        retry_after_secs = retry_after_secs,
        "rate limit exceeded"
    );
}

/// Log a secret-scanner rejection. Never includes the matched text.
pub fn content_rejected(agent_id: &str, field: &str, pattern: &str) {
    tracing::warn!(
        event = "content_rejected",
        agent_id = %agent_id,
        field = %field,
        pattern = %pattern,
        "submission rejected by secret scanner"
    );
}

pub fn duplicate_marked(question_id: &str, canonical_id: &str, agent_id: &str) {
    tracing::info!(
        event = "duplicate_marked",
        question_id = %question_id,
        canonical_id = %canonical_id,
        agent_id = %agent_id,
        "question closed as duplicate"
    );
}

/// Cached score differs from the re-derived one.
pub fn score_drift(answer_id: &str, cached: f64, derived: f64) {
    tracing::warn!(
        event = "score_drift",
        answer_id = %answer_id,
        cached = cached,
        derived = derived,
        "cached score does not match re-derived score"
    );
}

pub fn state_rebuilt(questions: usize, rate_events: usize) {
    tracing::info!(
        event = "state_rebuilt",
        questions = questions,
        rate_events = rate_events,
        "index and rate windows rebuilt from storage"
    );
}
