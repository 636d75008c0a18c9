use std::time::Duration;

use chrono::{DateTime, Utc};
use errorcache_core::errors::{ErrorCacheError, ErrorCacheResult};
use errorcache_core::models::OperationClass;

/// Result of a check-and-record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Recorded at `recorded_at`, which may be later than the instant asked
    /// for. `remaining` more events fit in the current window.
    Allowed {
        remaining: u32,
        recorded_at: DateTime<Utc>,
    },
    /// Not recorded. The oldest event in the window expires after `retry_after`.
    Limited { retry_after: Duration },
}

/// A recorded rate slot. Hand `recorded_at` back to
/// [`SlidingWindowLimiter::release`](crate::SlidingWindowLimiter::release) to
/// return it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateSlot {
    pub remaining: u32,
    pub recorded_at: DateTime<Utc>,
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    pub fn into_result(self, class: OperationClass) -> ErrorCacheResult<RateSlot> {
        match self {
            Self::Allowed {
                remaining,
                recorded_at,
            } => Ok(RateSlot {
                remaining,
                recorded_at,
            }),
            Self::Limited { retry_after } => Err(ErrorCacheError::RateLimited { class, retry_after }),
        }
    }
}
