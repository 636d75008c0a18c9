//! Inputs and results of repository operations.

use errorcache_core::models::{
    Answer, AnswerId, ErrorCategory, Evidence, Question, QuestionId, VerificationOutcome,
    VerificationTier,
};
use serde::{Deserialize, Serialize};

/// A question/answer pair from an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Attach to this question instead of matching by signature.
    #[serde(default)]
    pub question_id: Option<QuestionId>,
    pub title: String,
    pub error_text: String,
    #[serde(default)]
    pub category: ErrorCategory,
    pub root_cause: String,
    pub fix_approach: String,
    #[serde(default)]
    pub commands: Vec<String>,
}

impl Submission {
    pub fn new(
        title: impl Into<String>,
        error_text: impl Into<String>,
        root_cause: impl Into<String>,
        fix_approach: impl Into<String>,
    ) -> Self {
        Self {
            question_id: None,
            title: title.into(),
            error_text: error_text.into(),
            category: ErrorCategory::default(),
            root_cause: root_cause.into(),
            fix_approach: fix_approach.into(),
            commands: Vec::new(),
        }
    }

    pub fn for_question(mut self, question_id: QuestionId) -> Self {
        self.question_id = Some(question_id);
        self
    }

    pub fn with_category(mut self, category: ErrorCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands = commands.into_iter().map(Into::into).collect();
        self
    }
}

/// What a successful submission wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    pub question: Question,
    pub answer: Answer,
    pub created_question: bool,
}

/// A verifier's report on one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub answer_id: AnswerId,
    pub outcome: VerificationOutcome,
    pub tier: VerificationTier,
    pub environment: String,
    #[serde(default)]
    pub evidence: Option<Evidence>,
}

impl VerificationRequest {
    pub fn new(
        answer_id: AnswerId,
        outcome: VerificationOutcome,
        tier: VerificationTier,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            answer_id,
            outcome,
            tier,
            environment: environment.into(),
            evidence: None,
        }
    }

    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence = Some(evidence);
        self
    }
}

/// Search parameters. `limit` defaults to the configured search limit and is
/// capped at 50.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    #[serde(default)]
    pub category: Option<ErrorCategory>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
            limit: None,
        }
    }

    pub fn with_category(mut self, category: ErrorCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One search result: a question and its current best answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub question: Question,
    pub best_answer: Option<Answer>,
    /// Score of `best_answer` aged to the search instant, 0.0 without one.
    pub score: f64,
    pub similarity: f64,
    pub answer_count: usize,
}

/// Cached vs. re-derived score of one answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCheck {
    pub answer_id: AnswerId,
    pub cached: f64,
    pub derived: f64,
    pub matches: bool,
}
