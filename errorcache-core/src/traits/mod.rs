//! Collaborator traits the engine is written against.

mod clock;
mod storage;

pub use clock::{Clock, SystemClock};
pub use storage::{IErrorCacheStorage, SubmissionCommit, VerificationCommit};
