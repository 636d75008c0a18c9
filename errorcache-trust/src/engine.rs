//! TrustEngine: derive levels, gate operations, apply verification outcomes.

use errorcache_core::config::TrustConfig;
use errorcache_core::errors::{ErrorCacheError, ErrorCacheResult};
use errorcache_core::models::{Agent, Operation, TrustLevel};
use tracing::{debug, info};

use crate::policy::{level_for_stats, required_level};

/// How an agent's level moved after an outcome was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustTransition {
    Unchanged(TrustLevel),
    Promoted { from: TrustLevel, to: TrustLevel },
    Demoted { from: TrustLevel, to: TrustLevel },
}

impl TrustTransition {
    fn between(from: TrustLevel, to: TrustLevel) -> Self {
        match to.cmp(&from) {
            std::cmp::Ordering::Equal => Self::Unchanged(to),
            std::cmp::Ordering::Greater => Self::Promoted { from, to },
            std::cmp::Ordering::Less => Self::Demoted { from, to },
        }
    }

    pub fn level(&self) -> TrustLevel {
        match self {
            Self::Unchanged(level) => *level,
            Self::Promoted { to, .. } | Self::Demoted { to, .. } => *to,
        }
    }

    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

/// Stateless apart from its thresholds; safe to share.
#[derive(Debug, Clone, Default)]
pub struct TrustEngine {
    config: TrustConfig,
}

impl TrustEngine {
    pub fn new(config: &TrustConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Level derived from the agent's stats. The stored `trust_level` is ignored.
    pub fn current_level(&self, agent: &Agent) -> TrustLevel {
        level_for_stats(
            agent.verification_count,
            agent.verification_accuracy,
            agent.claimed_by_human,
            &self.config,
        )
    }

    /// Copy of `agent` with `trust_level` recomputed.
    pub fn refresh(&self, agent: &Agent) -> Agent {
        let mut refreshed = agent.clone();
        refreshed.trust_level = self.current_level(agent);
        refreshed
    }

    pub fn can_perform(&self, agent: &Agent, operation: Operation) -> bool {
        if agent.suspended && operation.is_write() {
            return false;
        }
        self.current_level(agent) >= required_level(operation)
    }

    /// `Ok(())` or `Unauthorized` with a reason naming the missing level.
    pub fn authorize(&self, agent: &Agent, operation: Operation) -> ErrorCacheResult<()> {
        if self.can_perform(agent, operation) {
            return Ok(());
        }
        let reason = if agent.suspended {
            "agent is suspended".to_string()
        } else {
            format!(
                "requires {} level, agent is {}",
                required_level(operation),
                self.current_level(agent)
            )
        };
        debug!(agent_id = %agent.agent_id, %operation, %reason, "trust check denied");
        Err(ErrorCacheError::Unauthorized {
            agent_id: agent.agent_id.to_string(),
            operation,
            reason,
        })
    }

    /// Apply one verification outcome to the verifier's stats.
    pub fn record_outcome(&self, agent: &Agent, was_accurate: bool) -> (Agent, TrustTransition) {
        let from = self.current_level(agent);

        let mut updated = agent.clone();
        updated.verification_count = agent.verification_count.saturating_add(1);
        if was_accurate {
            updated.corroborated_count = agent.corroborated_count.saturating_add(1);
        }
        updated.verification_accuracy =
            f64::from(updated.corroborated_count) / f64::from(updated.verification_count);
        updated.trust_level = self.current_level(&updated);

        let transition = TrustTransition::between(from, updated.trust_level);
        if transition.changed() {
            info!(
                agent_id = %updated.agent_id,
                from = %from,
                to = %updated.trust_level,
                "trust level changed"
            );
        } else {
            debug!(
                agent_id = %updated.agent_id,
                verification_count = updated.verification_count,
                accuracy = updated.verification_accuracy,
                "trust outcome recorded"
            );
        }
        (updated, transition)
    }
}
