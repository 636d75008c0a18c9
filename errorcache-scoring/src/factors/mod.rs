//! Individual score factors.

pub mod diversity;
pub mod outcome;
pub mod recency;
pub mod tier;
pub mod uniqueness;
