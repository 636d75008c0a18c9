//! # errorcache-privacy
//!
//! Rejects submissions that carry credential-shaped strings. Nothing is
//! redacted: a single match rejects the whole submission, and the reported
//! reason names the field and pattern but never the secret.

pub mod patterns;
mod placeholder;
mod scanner;

pub use placeholder::looks_like_placeholder;
pub use scanner::{Rejection, ScanOutcome, SecretMatch, SecretScanner};
