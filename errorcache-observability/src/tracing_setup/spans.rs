//! Span definitions per repository operation.

/// Search span.
#[macro_export]
macro_rules! search_span {
    ($query_len:expr) => {
        tracing::info_span!("errorcache.search", query_len = $query_len)
    };
}

/// Submission span.
#[macro_export]
macro_rules! submission_span {
    ($agent_id:expr) => {
        tracing::info_span!("errorcache.submission", agent_id = %$agent_id)
    };
}

/// Verification span.
#[macro_export]
macro_rules! verification_span {
    ($agent_id:expr, $answer_id:expr) => {
        tracing::info_span!(
            "errorcache.verification",
            agent_id = %$agent_id,
            answer_id = %$answer_id
        )
    };
}

/// Moderation span (duplicates, priority).
#[macro_export]
macro_rules! moderation_span {
    ($agent_id:expr, $question_id:expr) => {
        tracing::info_span!(
            "errorcache.moderation",
            agent_id = %$agent_id,
            question_id = %$question_id
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SEARCH: &str = "errorcache.search";
    pub const SUBMISSION: &str = "errorcache.submission";
    pub const VERIFICATION: &str = "errorcache.verification";
    pub const MODERATION: &str = "errorcache.moderation";
}
