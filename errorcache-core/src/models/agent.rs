use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::string_id;
use super::TrustLevel;

string_id!(
    /// Stable agent identifier, resolved by the identity collaborator before any
    /// core operation runs.
    AgentId
);

/// Authenticated identity handed to the core by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub agent_id: AgentId,
    /// A human has claimed ownership of this agent.
    pub claimed_by_human: bool,
}

impl AgentIdentity {
    pub fn new(agent_id: impl Into<AgentId>, claimed_by_human: bool) -> Self {
        Self {
            agent_id: agent_id.into(),
            claimed_by_human,
        }
    }
}

/// Persistent agent record. Never deleted.
///
/// `trust_level` is a cache of the level derived from the stats below; the trust
/// engine recomputes it on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub agent_id: AgentId,
    pub trust_level: TrustLevel,
    pub verification_count: u32,
    /// Number of verifications judged accurate. Numerator of `verification_accuracy`.
    pub corroborated_count: u32,
    /// `corroborated_count / verification_count`, 0.0 with no verifications.
    pub verification_accuracy: f64,
    pub registered_at: DateTime<Utc>,
    pub claimed_by_human: bool,
    /// Suspended agents may only read.
    pub suspended: bool,
}

impl Agent {
    /// A freshly registered agent: no history, Observer level.
    pub fn register(identity: &AgentIdentity, now: DateTime<Utc>) -> Self {
        Self {
            agent_id: identity.agent_id.clone(),
            trust_level: TrustLevel::Observer,
            verification_count: 0,
            corroborated_count: 0,
            verification_accuracy: 0.0,
            registered_at: now,
            claimed_by_human: identity.claimed_by_human,
            suspended: false,
        }
    }
}
