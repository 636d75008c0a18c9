//! # errorcache-ratelimit
//!
//! Sliding-window limiter keyed by `(agent_id, operation_class)`.
//! Check-and-record is one atomic step under the key's map shard lock.

mod decision;
mod limiter;

pub use decision::{RateDecision, RateSlot};
pub use limiter::SlidingWindowLimiter;
