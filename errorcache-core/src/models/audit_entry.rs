use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AgentId, OperationClass};

/// Write operations recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOperation {
    /// A submission whose target was not yet resolved (failed before matching).
    SubmitSolution,
    /// Submission that opened a new question.
    SubmitQuestion,
    /// Submission attached to an existing question.
    SubmitAnswer,
    RecordVerification,
    MarkDuplicate,
    SetPriority,
}

impl AuditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitSolution => "submit_solution",
            Self::SubmitQuestion => "submit_question",
            Self::SubmitAnswer => "submit_answer",
            Self::RecordVerification => "record_verification",
            Self::MarkDuplicate => "mark_duplicate",
            Self::SetPriority => "set_priority",
        }
    }

    /// The rate-limit class a successful entry of this kind consumed.
    pub fn rate_class(&self) -> Option<OperationClass> {
        match self {
            Self::SubmitQuestion => Some(OperationClass::NewQuestion),
            Self::SubmitAnswer => Some(OperationClass::NewAnswer),
            Self::RecordVerification => Some(OperationClass::Verification),
            Self::SubmitSolution | Self::MarkDuplicate | Self::SetPriority => None,
        }
    }
}

impl fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submit_solution" => Ok(Self::SubmitSolution),
            "submit_question" => Ok(Self::SubmitQuestion),
            "submit_answer" => Ok(Self::SubmitAnswer),
            "record_verification" => Ok(Self::RecordVerification),
            "mark_duplicate" => Ok(Self::MarkDuplicate),
            "set_priority" => Ok(Self::SetPriority),
            other => Err(format!("unknown audit operation: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Ok,
    Unauthorized,
    RateLimited,
    RejectedContent,
    NotFound,
    ValidationError,
    StorageError,
    ConfigError,
}

impl AuditOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Unauthorized => "unauthorized",
            Self::RateLimited => "rate_limited",
            Self::RejectedContent => "rejected_content",
            Self::NotFound => "not_found",
            Self::ValidationError => "validation_error",
            Self::StorageError => "storage_error",
            Self::ConfigError => "config_error",
        }
    }
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(Self::Ok),
            "unauthorized" => Ok(Self::Unauthorized),
            "rate_limited" => Ok(Self::RateLimited),
            "rejected_content" => Ok(Self::RejectedContent),
            "not_found" => Ok(Self::NotFound),
            "validation_error" => Ok(Self::ValidationError),
            "storage_error" => Ok(Self::StorageError),
            "config_error" => Ok(Self::ConfigError),
            other => Err(format!("unknown audit outcome: {other}")),
        }
    }
}

/// One audit record. Every write attempt produces exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub agent_id: AgentId,
    pub operation: AuditOperation,
    pub entity_id: Option<String>,
    pub outcome: AuditOutcome,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        agent_id: AgentId,
        operation: AuditOperation,
        outcome: AuditOutcome,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            agent_id,
            operation,
            entity_id: None,
            outcome,
            details: serde_json::Value::Null,
            timestamp,
        }
    }

    pub fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}
