use std::time::Duration;

use crate::models::{AuditOutcome, Operation, OperationClass};

use super::{ConfigError, StorageError};

/// Top-level error type for every ErrorCache operation.
///
/// All variants except [`ErrorCacheError::StorageError`] are detected before any
/// entity is written. Only storage failures are worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum ErrorCacheError {
    /// The agent's trust level (or suspension) does not permit the operation.
    #[error("unauthorized: agent {agent_id} may not {operation}: {reason}")]
    Unauthorized {
        agent_id: String,
        operation: Operation,
        reason: String,
    },

    /// The agent exhausted its sliding window for this operation class.
    #[error("rate limited: {class} window exhausted, retry after {}s", .retry_after.as_secs())]
    RateLimited {
        class: OperationClass,
        retry_after: Duration,
    },

    /// The secret scanner found a credential-shaped string.
    #[error("rejected content in {field}: matched {pattern}")]
    RejectedContent { field: String, pattern: String },

    /// Unknown question, answer, or agent id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Missing or malformed input.
    #[error("validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    StorageError(#[from] StorageError),

    #[error(transparent)]
    ConfigError(#[from] ConfigError),
}

/// Result alias used across the workspace.
pub type ErrorCacheResult<T> = Result<T, ErrorCacheError>;

impl ErrorCacheError {
    /// Stable error code for callers at the transport boundary.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::RejectedContent { .. } => "REJECTED_CONTENT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// Whether a caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageError(_))
    }

    /// Retry hint for rate-limited requests.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// The outcome recorded in the audit log for a failed write.
    pub fn audit_outcome(&self) -> AuditOutcome {
        match self {
            Self::Unauthorized { .. } => AuditOutcome::Unauthorized,
            Self::RateLimited { .. } => AuditOutcome::RateLimited,
            Self::RejectedContent { .. } => AuditOutcome::RejectedContent,
            Self::NotFound { .. } => AuditOutcome::NotFound,
            Self::ValidationError(_) => AuditOutcome::ValidationError,
            Self::StorageError(_) => AuditOutcome::StorageError,
            Self::ConfigError(_) => AuditOutcome::ConfigError,
        }
    }
}
