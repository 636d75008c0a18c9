//! # errorcache-repository
//!
//! The engine's entry point. [`Repository`] owns the match index, the rate
//! limiter and the trust and scoring engines, and drives every operation
//! through the storage collaborator:
//!
//! - `search` / `search_with`: read-only, ungated.
//! - `submit_question_answer`: scan, match, authorize, rate-limit, commit.
//! - `record_verification`: authorize, rate-limit, then corroborate, rescore
//!   and update trust in one commit under the answer's and agent's locks.
//! - `mark_duplicate` / `set_priority`: Trusted-only moderation.
//!
//! Every write attempt leaves exactly one audit record.

mod locks;
mod ops;
mod repository;
pub mod requests;
pub mod validation;

pub use repository::Repository;
pub use requests::{
    ScoreCheck, SearchHit, SearchQuery, Submission, SubmissionReceipt, VerificationRequest,
};
