use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::string_id;
use super::AgentId;

string_id!(
    /// Question identifier.
    QuestionId
);

/// Coarse error category attached to a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Connection,
    Dependency,
    Build,
    Runtime,
    TypeError,
    Permission,
    Config,
    SslTls,
    Memory,
    Timeout,
    #[default]
    Other,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 11] = [
        ErrorCategory::Connection,
        ErrorCategory::Dependency,
        ErrorCategory::Build,
        ErrorCategory::Runtime,
        ErrorCategory::TypeError,
        ErrorCategory::Permission,
        ErrorCategory::Config,
        ErrorCategory::SslTls,
        ErrorCategory::Memory,
        ErrorCategory::Timeout,
        ErrorCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::Dependency => "dependency",
            Self::Build => "build",
            Self::Runtime => "runtime",
            Self::TypeError => "type_error",
            Self::Permission => "permission",
            Self::Config => "config",
            Self::SslTls => "ssl_tls",
            Self::Memory => "memory",
            Self::Timeout => "timeout",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("unknown error category: {s}"))
    }
}

/// Moderation state of a question.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuestionStatus {
    #[default]
    Open,
    /// Closed as a duplicate of `canonical`. Excluded from matching and search.
    Duplicate { canonical: QuestionId },
}

impl QuestionStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    pub fn canonical(&self) -> Option<&QuestionId> {
        match self {
            Self::Open => None,
            Self::Duplicate { canonical } => Some(canonical),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionPriority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl QuestionPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for QuestionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// An error signature agents can attach answers to.
///
/// Immutable after creation except for `status` and `priority`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: QuestionId,
    pub title: String,
    /// Normalized text used for matching.
    pub error_signature: String,
    /// Submitted error text, truncated.
    pub raw_error: String,
    /// blake3 hex digest of `error_signature`.
    pub fingerprint: String,
    pub category: ErrorCategory,
    pub created_by: AgentId,
    pub created_at: DateTime<Utc>,
    pub status: QuestionStatus,
    pub priority: QuestionPriority,
}
