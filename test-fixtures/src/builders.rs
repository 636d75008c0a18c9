use chrono::{DateTime, Utc};
use errorcache_core::models::*;
use errorcache_core::traits::IErrorCacheStorage;

/// Identity of an agent a human has claimed.
pub fn claimed(agent_id: &str) -> AgentIdentity {
    AgentIdentity::new(agent_id, true)
}

/// Identity of an unclaimed agent.
pub fn unclaimed(agent_id: &str) -> AgentIdentity {
    AgentIdentity::new(agent_id, false)
}

/// A claimed agent with the given history. The stored level is left at
/// Observer; the trust engine derives the real level on load.
pub fn agent_with_stats(
    agent_id: &str,
    verification_count: u32,
    corroborated_count: u32,
    registered_at: DateTime<Utc>,
) -> Agent {
    let mut agent = Agent::register(&claimed(agent_id), registered_at);
    agent.verification_count = verification_count;
    agent.corroborated_count = corroborated_count;
    agent.verification_accuracy = if verification_count == 0 {
        0.0
    } else {
        f64::from(corroborated_count) / f64::from(verification_count)
    };
    agent
}

/// Meets the default Contributor thresholds exactly.
pub fn contributor(agent_id: &str, registered_at: DateTime<Utc>) -> Agent {
    agent_with_stats(agent_id, 10, 10, registered_at)
}

/// Meets the default Trusted thresholds.
pub fn trusted(agent_id: &str, registered_at: DateTime<Utc>) -> Agent {
    agent_with_stats(agent_id, 50, 50, registered_at)
}

/// Persist agents directly through the storage collaborator.
pub async fn seed_agents<S: IErrorCacheStorage>(storage: &S, agents: &[Agent]) {
    for agent in agents {
        storage.upsert_agent(agent).await.unwrap();
    }
}

/// A question row as storage sees it. The signature is the lowercased text
/// and the fingerprint a dummy; use the matching crate for real signatures.
pub fn sample_question(
    question_id: &str,
    raw_error: &str,
    created_by: &str,
    created_at: DateTime<Utc>,
) -> Question {
    Question {
        question_id: QuestionId::from(question_id),
        title: raw_error.chars().take(300).collect(),
        error_signature: raw_error.to_lowercase(),
        raw_error: raw_error.to_string(),
        fingerprint: format!("fp-{question_id}"),
        category: ErrorCategory::Other,
        created_by: AgentId::from(created_by),
        created_at,
        status: QuestionStatus::Open,
        priority: QuestionPriority::Normal,
    }
}

/// An answer with valid field lengths and no verifications.
pub fn sample_answer(question_id: &QuestionId, owner: &str, created_at: DateTime<Utc>) -> Answer {
    Answer {
        answer_id: AnswerId::new(),
        question_id: question_id.clone(),
        owner_agent_id: AgentId::from(owner),
        root_cause: "The requests package is not installed in the active interpreter".into(),
        fix_approach: "Install requests with pip into the same virtual environment".into(),
        commands: vec!["pip install requests".into()],
        created_at,
        current_score: 0.0,
        score_updated_at: created_at,
        verification_count: 0,
        pass_count: 0,
    }
}

/// A verification without evidence, not yet judged for corroboration.
pub fn sample_verification(
    answer_id: &AnswerId,
    verifier: &str,
    outcome: VerificationOutcome,
    tier: VerificationTier,
    environment: &str,
    created_at: DateTime<Utc>,
) -> Verification {
    Verification {
        verification_id: VerificationId::new(),
        answer_id: answer_id.clone(),
        verifier_agent_id: AgentId::from(verifier),
        outcome,
        tier,
        environment: environment.to_string(),
        evidence: None,
        corroborated: true,
        created_at,
    }
}

/// Evidence carrying a zero exit code and a test summary.
pub fn passing_evidence() -> Evidence {
    Evidence {
        exit_codes: vec![0],
        test_results: Some("12 passed, 0 failed".into()),
        notes: None,
    }
}
