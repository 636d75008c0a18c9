use chrono::Utc;
use errorcache_core::config::TrustConfig;
use errorcache_core::errors::ErrorCacheError;
use errorcache_core::models::*;
use errorcache_trust::{is_corroborated, TrustEngine, TrustTransition};
use test_fixtures::{agent_with_stats, claimed, sample_verification, unclaimed};

fn engine() -> TrustEngine {
    TrustEngine::new(&TrustConfig::default())
}

#[test]
fn stored_level_is_ignored_on_read() {
    let mut agent = agent_with_stats("a", 60, 60, Utc::now());
    agent.trust_level = TrustLevel::Observer;
    assert_eq!(engine().current_level(&agent), TrustLevel::Trusted);
    assert_eq!(engine().refresh(&agent).trust_level, TrustLevel::Trusted);
}

#[test]
fn observer_can_only_read() {
    let agent = Agent::register(&unclaimed("o"), Utc::now());
    let engine = engine();
    assert!(engine.can_perform(&agent, Operation::Search));
    assert!(engine.can_perform(&agent, Operation::Read));
    assert!(!engine.can_perform(&agent, Operation::SubmitVerification));
    assert!(!engine.can_perform(&agent, Operation::SubmitAnswer));
}

#[test]
fn verifier_attaches_answers_but_cannot_open_questions() {
    let agent = Agent::register(&claimed("v"), Utc::now());
    let engine = engine();
    assert_eq!(engine.current_level(&agent), TrustLevel::Verifier);
    assert!(engine.can_perform(&agent, Operation::SubmitAnswer));
    assert!(engine.can_perform(&agent, Operation::SubmitVerification));

    let err = engine.authorize(&agent, Operation::SubmitQuestion).unwrap_err();
    match err {
        ErrorCacheError::Unauthorized { operation, reason, .. } => {
            assert_eq!(operation, Operation::SubmitQuestion);
            assert!(reason.contains("contributor"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn suspended_agents_lose_write_access() {
    let mut agent = agent_with_stats("s", 60, 60, Utc::now());
    agent.suspended = true;
    let engine = engine();
    assert!(engine.can_perform(&agent, Operation::Search));
    assert!(!engine.can_perform(&agent, Operation::SubmitVerification));
    assert!(engine.authorize(&agent, Operation::SetPriority).is_err());
}

#[test]
fn record_outcome_updates_counts_and_accuracy() {
    let engine = engine();
    let agent = Agent::register(&claimed("b"), Utc::now());

    let (after_good, t1) = engine.record_outcome(&agent, true);
    assert_eq!(after_good.verification_count, 1);
    assert_eq!(after_good.corroborated_count, 1);
    assert_eq!(after_good.verification_accuracy, 1.0);
    assert_eq!(t1, TrustTransition::Unchanged(TrustLevel::Verifier));

    let (after_bad, _) = engine.record_outcome(&after_good, false);
    assert_eq!(after_bad.verification_count, 2);
    assert_eq!(after_bad.corroborated_count, 1);
    assert_eq!(after_bad.verification_accuracy, 0.5);
}

#[test]
fn tenth_accurate_outcome_promotes_to_contributor() {
    let engine = engine();
    let agent = agent_with_stats("p", 9, 9, Utc::now());
    let (updated, transition) = engine.record_outcome(&agent, true);
    assert_eq!(updated.trust_level, TrustLevel::Contributor);
    assert_eq!(
        transition,
        TrustTransition::Promoted {
            from: TrustLevel::Verifier,
            to: TrustLevel::Contributor
        }
    );
}

#[test]
fn inaccurate_outcomes_demote() {
    let engine = engine();
    // 10 / 16 = 0.625 -> contributor; one miss gives 10 / 17 = 0.588.
    let agent = agent_with_stats("d", 16, 10, Utc::now());
    assert_eq!(engine.current_level(&agent), TrustLevel::Contributor);
    let (updated, transition) = engine.record_outcome(&agent, false);
    assert_eq!(updated.trust_level, TrustLevel::Verifier);
    assert!(matches!(transition, TrustTransition::Demoted { .. }));
    assert!(transition.changed());
}

#[test]
fn custom_thresholds_apply() {
    let config = TrustConfig {
        contributor_min_verifications: 2,
        contributor_min_accuracy: 0.5,
        trusted_min_verifications: 3,
        trusted_min_accuracy: 0.9,
    };
    let engine = TrustEngine::new(&config);
    let agent = agent_with_stats("c", 2, 1, Utc::now());
    assert_eq!(engine.current_level(&agent), TrustLevel::Contributor);
}

#[test]
fn verification_without_independent_prior_is_not_corroborated() {
    let now = Utc::now();
    let answer = AnswerId::new();
    let owner = AgentId::from("owner");
    let b = AgentId::from("b");
    // Only the owner has verified before.
    let prior = vec![sample_verification(
        &answer,
        "owner",
        VerificationOutcome::Pass,
        VerificationTier::SelfReport,
        "linux",
        now,
    )];
    assert!(!is_corroborated(&b, &owner, VerificationOutcome::Pass, &prior));
    assert!(!is_corroborated(&b, &owner, VerificationOutcome::Pass, &[]));
}

#[test]
fn repeat_verification_is_never_corroborated() {
    let now = Utc::now();
    let answer = AnswerId::new();
    let owner = AgentId::from("owner");
    let prior = vec![
        sample_verification(&answer, "x", VerificationOutcome::Pass, VerificationTier::EvidenceBacked, "linux", now),
        sample_verification(&answer, "b", VerificationOutcome::Pass, VerificationTier::SelfReport, "linux", now),
    ];
    assert!(!is_corroborated(&AgentId::from("b"), &owner, VerificationOutcome::Pass, &prior));
    assert!(is_corroborated(&AgentId::from("c"), &owner, VerificationOutcome::Pass, &prior));
}

#[test]
fn lone_agent_cannot_raise_its_own_accuracy() {
    let now = Utc::now();
    let engine = engine();
    let owner = AgentId::from("owner");
    let lone = AgentId::from("lone");
    let mut agent = agent_with_stats("lone", 0, 0, now);

    // Ten fresh answers, each verified first by the same agent.
    for _ in 0..10 {
        let corroborated = is_corroborated(&lone, &owner, VerificationOutcome::Pass, &[]);
        let (next, _) = engine.record_outcome(&agent, corroborated);
        agent = next;
    }
    assert_eq!(agent.verification_count, 10);
    assert_eq!(agent.verification_accuracy, 0.0);
    assert_eq!(engine.current_level(&agent), TrustLevel::Verifier);
}

#[test]
fn corroboration_needs_agreeing_independent_verification() {
    let now = Utc::now();
    let answer = AnswerId::new();
    let owner = AgentId::from("owner");
    let prior = vec![
        sample_verification(&answer, "x", VerificationOutcome::Pass, VerificationTier::EvidenceBacked, "linux", now),
        sample_verification(&answer, "y", VerificationOutcome::Partial, VerificationTier::SelfReport, "macos", now),
    ];
    let z = AgentId::from("z");
    assert!(is_corroborated(&z, &owner, VerificationOutcome::Pass, &prior));
    assert!(is_corroborated(&z, &owner, VerificationOutcome::Partial, &prior));
    assert!(!is_corroborated(&z, &owner, VerificationOutcome::Fail, &prior));
}
