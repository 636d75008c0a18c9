use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::OperationClass;

/// A sliding-window limit: at most `max_events` within `window_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowLimit {
    pub max_events: u32,
    pub window_secs: u64,
}

impl WindowLimit {
    pub const fn new(max_events: u32, window_secs: u64) -> Self {
        Self {
            max_events,
            window_secs,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub new_question: WindowLimit,
    pub new_answer: WindowLimit,
    pub verification: WindowLimit,
}

impl RateLimitConfig {
    pub fn limit_for(&self, class: OperationClass) -> WindowLimit {
        match class {
            OperationClass::NewQuestion => self.new_question,
            OperationClass::NewAnswer => self.new_answer,
            OperationClass::Verification => self.verification,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            new_question: WindowLimit::new(
                defaults::DEFAULT_NEW_QUESTION_LIMIT,
                defaults::DEFAULT_NEW_QUESTION_WINDOW_SECS,
            ),
            new_answer: WindowLimit::new(
                defaults::DEFAULT_NEW_ANSWER_LIMIT,
                defaults::DEFAULT_NEW_ANSWER_WINDOW_SECS,
            ),
            verification: WindowLimit::new(
                defaults::DEFAULT_VERIFICATION_LIMIT,
                defaults::DEFAULT_VERIFICATION_WINDOW_SECS,
            ),
        }
    }
}
