//! # errorcache-trust
//!
//! Per-agent trust ladder: Observer → Verifier → Contributor → Trusted.
//! The level is a pure function of an agent's verification history and
//! human claim, recomputed on every load and every recorded outcome.

mod corroboration;
mod engine;
mod policy;

pub use corroboration::is_corroborated;
pub use engine::{TrustEngine, TrustTransition};
pub use policy::{level_for_stats, required_level};
