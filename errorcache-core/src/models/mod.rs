//! Entity model: agents, questions, answers, verifications, audit records.

pub mod agent;
pub mod answer;
pub mod audit_entry;
mod ids;
pub mod operation;
pub mod question;
pub mod trust_level;
pub mod verification;

pub use agent::{Agent, AgentId, AgentIdentity};
pub use answer::{Answer, AnswerId};
pub use audit_entry::{AuditEntry, AuditOperation, AuditOutcome};
pub use operation::{Operation, OperationClass};
pub use question::{ErrorCategory, Question, QuestionId, QuestionPriority, QuestionStatus};
pub use trust_level::TrustLevel;
pub use verification::{Evidence, Verification, VerificationId, VerificationOutcome, VerificationTier};
