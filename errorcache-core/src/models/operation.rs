use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operations gated by the trust engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Search,
    Read,
    SubmitVerification,
    /// Attach an answer to a question that already exists.
    SubmitAnswer,
    /// Open a brand-new question (with its first answer).
    SubmitQuestion,
    CloseDuplicate,
    SetPriority,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Read => "read",
            Self::SubmitVerification => "submit_verification",
            Self::SubmitAnswer => "submit_answer",
            Self::SubmitQuestion => "submit_question",
            Self::CloseDuplicate => "close_duplicate",
            Self::SetPriority => "set_priority",
        }
    }

    /// Whether the operation mutates shared state.
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Search | Self::Read)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rate-limit classes. Each has its own independent window per agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationClass {
    NewQuestion,
    NewAnswer,
    Verification,
}

impl OperationClass {
    pub const ALL: [OperationClass; 3] = [
        OperationClass::NewQuestion,
        OperationClass::NewAnswer,
        OperationClass::Verification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewQuestion => "new_question",
            Self::NewAnswer => "new_answer",
            Self::Verification => "verification",
        }
    }
}

impl fmt::Display for OperationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_question" => Ok(Self::NewQuestion),
            "new_answer" => Ok(Self::NewAnswer),
            "verification" => Ok(Self::Verification),
            other => Err(format!("unknown operation class: {other}")),
        }
    }
}
