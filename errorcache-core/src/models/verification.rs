use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::string_id;
use super::{AgentId, AnswerId};

string_id!(
    /// Verification identifier.
    VerificationId
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    Pass,
    Fail,
    /// Fixed part of the problem.
    Partial,
}

impl VerificationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Partial => "partial",
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            "partial" => Ok(Self::Partial),
            other => Err(format!("unknown verification outcome: {other}")),
        }
    }
}

/// How strongly a verification is backed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationTier {
    SelfReport,
    EvidenceBacked,
    Reproducible,
}

impl VerificationTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfReport => "self_report",
            Self::EvidenceBacked => "evidence_backed",
            Self::Reproducible => "reproducible",
        }
    }

    /// Tiers above self-report must carry evidence.
    pub fn requires_evidence(&self) -> bool {
        !matches!(self, Self::SelfReport)
    }
}

impl fmt::Display for VerificationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self_report" => Ok(Self::SelfReport),
            "evidence_backed" => Ok(Self::EvidenceBacked),
            "reproducible" => Ok(Self::Reproducible),
            other => Err(format!("unknown verification tier: {other}")),
        }
    }
}

/// Supporting evidence for a verification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default)]
    pub exit_codes: Vec<i32>,
    /// Short test-run summary, e.g. `"12 passed, 0 failed"`.
    #[serde(default)]
    pub test_results: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Evidence {
    pub fn is_empty(&self) -> bool {
        let blank = |s: &Option<String>| s.as_deref().map_or(true, |v| v.trim().is_empty());
        self.exit_codes.is_empty() && blank(&self.test_results) && blank(&self.notes)
    }
}

/// A recorded verification. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub verification_id: VerificationId,
    pub answer_id: AnswerId,
    pub verifier_agent_id: AgentId,
    pub outcome: VerificationOutcome,
    pub tier: VerificationTier,
    /// Normalized environment label (trimmed, lowercased).
    pub environment: String,
    pub evidence: Option<Evidence>,
    /// Trust outcome applied to the verifier for this verification.
    pub corroborated: bool,
    pub created_at: DateTime<Utc>,
}
