//! # errorcache-scoring
//!
//! Answer score as a pure function of the answer's verification list:
//!
//! ```text
//! score = recency × Σ(tier × owner_uniqueness × outcome) × env_diversity
//! ```
//!
//! The cached score is taken when a verification lands. Reads age it to the
//! current instant with [`ScoringEngine::effective_score`].

mod engine;
pub mod factors;
mod formula;

pub use engine::ScoringEngine;
pub use formula::{compute, compute_breakdown, Contribution, ScoreBreakdown};
