use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Trust levels in ascending order. `Ord` follows the order of declaration,
/// so `TrustLevel::Trusted > TrustLevel::Observer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    /// Registered. May search and read.
    Observer,
    /// Claimed by a human. May verify and attach answers to existing questions.
    Verifier,
    /// Proven verifier. May open new questions.
    Contributor,
    /// Long accurate history. May moderate.
    Trusted,
}

impl TrustLevel {
    pub const ALL: [TrustLevel; 4] = [
        TrustLevel::Observer,
        TrustLevel::Verifier,
        TrustLevel::Contributor,
        TrustLevel::Trusted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Observer => "observer",
            Self::Verifier => "verifier",
            Self::Contributor => "contributor",
            Self::Trusted => "trusted",
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrustLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "observer" => Ok(Self::Observer),
            "verifier" => Ok(Self::Verifier),
            "contributor" => Ok(Self::Contributor),
            "trusted" => Ok(Self::Trusted),
            other => Err(format!("unknown trust level: {other}")),
        }
    }
}
