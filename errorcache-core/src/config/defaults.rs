//! Compiled defaults for every configuration table.

// Storage
pub const DEFAULT_DB_PATH: &str = "errorcache.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// Trust thresholds
pub const DEFAULT_CONTRIBUTOR_MIN_VERIFICATIONS: u32 = 10;
pub const DEFAULT_CONTRIBUTOR_MIN_ACCURACY: f64 = 0.6;
pub const DEFAULT_TRUSTED_MIN_VERIFICATIONS: u32 = 50;
pub const DEFAULT_TRUSTED_MIN_ACCURACY: f64 = 0.8;

// Scoring
pub const DEFAULT_SELF_REPORT_WEIGHT: f64 = 0.1;
pub const DEFAULT_EVIDENCE_BACKED_WEIGHT: f64 = 0.5;
pub const DEFAULT_REPRODUCIBLE_WEIGHT: f64 = 1.0;
pub const DEFAULT_REPEAT_VERIFIER_WEIGHT: f64 = 0.1;
pub const DEFAULT_PASS_WEIGHT: f64 = 1.0;
pub const DEFAULT_PARTIAL_WEIGHT: f64 = 0.5;
pub const DEFAULT_FAIL_WEIGHT: f64 = 0.0;
pub const DEFAULT_DIVERSITY_STEP: f64 = 0.25;
pub const DEFAULT_DIVERSITY_CAP: f64 = 2.0;
pub const DEFAULT_RECENCY_FLOOR: f64 = 0.2;
pub const DEFAULT_RECENCY_DECAY_DAYS: f64 = 30.0;

// Rate limits: (max events, window seconds)
pub const DEFAULT_NEW_QUESTION_LIMIT: u32 = 1;
pub const DEFAULT_NEW_QUESTION_WINDOW_SECS: u64 = 600;
pub const DEFAULT_NEW_ANSWER_LIMIT: u32 = 10;
pub const DEFAULT_NEW_ANSWER_WINDOW_SECS: u64 = 3_600;
pub const DEFAULT_VERIFICATION_LIMIT: u32 = 20;
pub const DEFAULT_VERIFICATION_WINDOW_SECS: u64 = 3_600;

// Matching
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.6;
pub const DEFAULT_SEARCH_THRESHOLD: f64 = 0.3;
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

// Observability
pub const DEFAULT_LOG_FILTER: &str = "info";
