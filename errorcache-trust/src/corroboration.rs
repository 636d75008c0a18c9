use errorcache_core::models::{AgentId, Verification, VerificationOutcome};

/// Whether a new verification agrees with independent prior evidence.
///
/// Only prior verifications of the same answer by agents other than the
/// verifier and the answer owner count, and at least one of them must report
/// the same outcome. A verification with nothing independent to agree with is
/// not corroborated. Neither is a repeat verification of an answer the
/// verifier has already verified.
pub fn is_corroborated(
    verifier: &AgentId,
    answer_owner: &AgentId,
    outcome: VerificationOutcome,
    prior: &[Verification],
) -> bool {
    if prior.iter().any(|v| &v.verifier_agent_id == verifier) {
        return false;
    }
    prior
        .iter()
        .filter(|v| &v.verifier_agent_id != answer_owner)
        .any(|v| v.outcome == outcome)
}
