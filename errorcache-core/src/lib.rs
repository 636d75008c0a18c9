//! # errorcache-core
//!
//! Foundation crate for the ErrorCache engine.
//! Defines the entity model, the error taxonomy, configuration, constants,
//! and the collaborator traits (storage, clock) every other crate builds on.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ErrorCacheConfig;
pub use errors::{ErrorCacheError, ErrorCacheResult};
pub use models::{
    Agent, AgentId, AgentIdentity, Answer, AnswerId, AuditEntry, AuditOperation, AuditOutcome,
    ErrorCategory, Evidence, Operation, OperationClass, Question, QuestionId, QuestionPriority,
    QuestionStatus, TrustLevel, Verification, VerificationId, VerificationOutcome,
    VerificationTier,
};
pub use traits::{Clock, IErrorCacheStorage, SubmissionCommit, SystemClock, VerificationCommit};
