use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::string_id;
use super::{AgentId, QuestionId};

string_id!(
    /// Answer identifier.
    AnswerId
);

/// A proposed fix for a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer_id: AnswerId,
    pub question_id: QuestionId,
    pub owner_agent_id: AgentId,
    pub root_cause: String,
    pub fix_approach: String,
    /// Ordered fix commands.
    pub commands: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Cached score. Always re-derivable from the verification set at `score_updated_at`.
    pub current_score: f64,
    pub score_updated_at: DateTime<Utc>,
    pub verification_count: u32,
    pub pass_count: u32,
}

impl Answer {
    /// Share of verifications that passed. `None` before the first verification.
    pub fn success_rate(&self) -> Option<f64> {
        if self.verification_count == 0 {
            None
        } else {
            Some(f64::from(self.pass_count) / f64::from(self.verification_count))
        }
    }
}
