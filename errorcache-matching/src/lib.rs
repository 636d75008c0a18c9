//! # errorcache-matching
//!
//! Turns raw error text into a deterministic signature, compares signatures by
//! token-set overlap, and keeps a snapshot index of open questions for
//! "same error" detection and search.

mod index;
pub mod normalize;
mod signature;
pub mod similarity;

pub use index::{AnswerScore, Candidate, IndexEntry, MatchIndex};
pub use normalize::normalize;
pub use signature::Signature;
pub use similarity::{jaccard, similarity};
