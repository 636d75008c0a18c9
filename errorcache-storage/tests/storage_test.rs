//! Round-trips and commit atomicity against the in-memory engine.

use chrono::Duration;
use errorcache_core::models::*;
use errorcache_core::traits::{Clock, IErrorCacheStorage, SubmissionCommit, VerificationCommit};
use errorcache_storage::StorageEngine;
use test_fixtures::*;

fn audit(agent: &str, op: AuditOperation, clock: &ManualClock) -> AuditEntry {
    AuditEntry::new(AgentId::from(agent), op, AuditOutcome::Ok, clock.now())
}

#[tokio::test]
async fn agent_roundtrip_and_upsert_keeps_registration() {
    let clock = ManualClock::fixed();
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = clock.now();

    let mut agent = contributor("alice", now);
    engine.upsert_agent(&agent).await.unwrap();
    assert_eq!(engine.get_agent(&agent.agent_id).await.unwrap(), Some(agent.clone()));

    agent.verification_count += 1;
    agent.suspended = true;
    let original_registration = agent.registered_at;
    agent.registered_at = now + Duration::days(3);
    engine.upsert_agent(&agent).await.unwrap();

    let loaded = engine.get_agent(&agent.agent_id).await.unwrap().unwrap();
    assert_eq!(loaded.verification_count, 11);
    assert!(loaded.suspended);
    assert_eq!(loaded.registered_at, original_registration);

    assert!(engine.get_agent(&AgentId::from("nobody")).await.unwrap().is_none());
}

#[tokio::test]
async fn submission_commits_question_answer_and_audit_together() {
    let clock = ManualClock::fixed();
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = clock.now();

    let question = sample_question(
        "q1",
        "ModuleNotFoundError: No module named 'requests'",
        "alice",
        now,
    );
    let answer = sample_answer(&question.question_id, "alice", now);
    let entry = audit("alice", AuditOperation::SubmitQuestion, &clock).with_entity("q1");

    engine
        .commit_submission(SubmissionCommit {
            question: Some(&question),
            answer: &answer,
            audit: &entry,
        })
        .await
        .unwrap();

    assert_eq!(
        engine.get_question(&question.question_id).await.unwrap(),
        Some(question.clone())
    );
    assert_eq!(engine.get_answer(&answer.answer_id).await.unwrap(), Some(answer.clone()));
    assert_eq!(
        engine.answers_for_question(&question.question_id).await.unwrap(),
        vec![answer]
    );
    assert_eq!(
        engine.audit_for_agent(&AgentId::from("alice")).await.unwrap(),
        vec![entry]
    );
}

#[tokio::test]
async fn failed_submission_writes_nothing() {
    let clock = ManualClock::fixed();
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = clock.now();

    // Answer to a question that does not exist: foreign key violation.
    let answer = sample_answer(&QuestionId::from("missing"), "bob", now);
    let entry = audit("bob", AuditOperation::SubmitAnswer, &clock);
    let err = engine
        .commit_submission(SubmissionCommit {
            question: None,
            answer: &answer,
            audit: &entry,
        })
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "STORAGE_ERROR");
    assert!(err.is_retryable());
    assert!(engine.get_answer(&answer.answer_id).await.unwrap().is_none());
    assert!(engine.audit_for_agent(&AgentId::from("bob")).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_question_id_rolls_back_whole_commit() {
    let clock = ManualClock::fixed();
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = clock.now();

    let question = sample_question("q1", "TypeError: x is undefined", "alice", now);
    let first = sample_answer(&question.question_id, "alice", now);
    let entry = audit("alice", AuditOperation::SubmitQuestion, &clock);
    engine
        .commit_submission(SubmissionCommit {
            question: Some(&question),
            answer: &first,
            audit: &entry,
        })
        .await
        .unwrap();

    let second = sample_answer(&question.question_id, "alice", now);
    assert!(engine
        .commit_submission(SubmissionCommit {
            question: Some(&question),
            answer: &second,
            audit: &entry,
        })
        .await
        .is_err());

    assert!(engine.get_answer(&second.answer_id).await.unwrap().is_none());
    assert_eq!(engine.audit_for_agent(&AgentId::from("alice")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn verification_commit_updates_answer_and_agent() {
    let clock = ManualClock::fixed();
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = clock.now();

    let question = sample_question("q1", "ECONNREFUSED 127.0.0.1:5432", "alice", now);
    let mut answer = sample_answer(&question.question_id, "alice", now);
    let entry = audit("alice", AuditOperation::SubmitQuestion, &clock);
    engine
        .commit_submission(SubmissionCommit {
            question: Some(&question),
            answer: &answer,
            audit: &entry,
        })
        .await
        .unwrap();

    clock.advance_secs(60);
    let mut v = sample_verification(
        &answer.answer_id,
        "bob",
        VerificationOutcome::Pass,
        VerificationTier::EvidenceBacked,
        "ubuntu",
        clock.now(),
    );
    v.evidence = Some(passing_evidence());
    answer.current_score = 0.5;
    answer.score_updated_at = v.created_at;
    answer.verification_count = 1;
    answer.pass_count = 1;
    let mut bob = Agent::register(&claimed("bob"), now);
    bob.verification_count = 1;
    bob.corroborated_count = 1;
    bob.verification_accuracy = 1.0;
    let entry = audit("bob", AuditOperation::RecordVerification, &clock);

    engine
        .commit_verification(VerificationCommit {
            verification: &v,
            answer: &answer,
            agent: &bob,
            audit: &entry,
        })
        .await
        .unwrap();

    assert_eq!(engine.verifications_for_answer(&answer.answer_id).await.unwrap(), vec![v]);
    assert_eq!(engine.get_answer(&answer.answer_id).await.unwrap(), Some(answer));
    assert_eq!(engine.get_agent(&bob.agent_id).await.unwrap(), Some(bob));
}

#[tokio::test]
async fn verification_for_missing_answer_writes_nothing() {
    let clock = ManualClock::fixed();
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = clock.now();

    let answer = sample_answer(&QuestionId::from("q"), "alice", now);
    let v = sample_verification(
        &answer.answer_id,
        "bob",
        VerificationOutcome::Fail,
        VerificationTier::SelfReport,
        "macos",
        now,
    );
    let bob = Agent::register(&claimed("bob"), now);
    let entry = audit("bob", AuditOperation::RecordVerification, &clock);

    assert!(engine
        .commit_verification(VerificationCommit {
            verification: &v,
            answer: &answer,
            agent: &bob,
            audit: &entry,
        })
        .await
        .is_err());
    assert!(engine.get_agent(&bob.agent_id).await.unwrap().is_none());
    assert!(engine.verifications_for_answer(&answer.answer_id).await.unwrap().is_empty());
    assert!(engine.audit_for_agent(&bob.agent_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn verifications_are_ordered_by_time_then_id() {
    let clock = ManualClock::fixed();
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = clock.now();

    let question = sample_question("q1", "segfault", "alice", now);
    let answer = sample_answer(&question.question_id, "alice", now);
    let entry = audit("alice", AuditOperation::SubmitQuestion, &clock);
    engine
        .commit_submission(SubmissionCommit {
            question: Some(&question),
            answer: &answer,
            audit: &entry,
        })
        .await
        .unwrap();

    let mut later = sample_verification(
        &answer.answer_id,
        "b",
        VerificationOutcome::Pass,
        VerificationTier::SelfReport,
        "linux",
        now + Duration::seconds(10),
    );
    later.verification_id = VerificationId::from("a-later");
    let mut tie_b = sample_verification(
        &answer.answer_id,
        "c",
        VerificationOutcome::Pass,
        VerificationTier::SelfReport,
        "linux",
        now,
    );
    tie_b.verification_id = VerificationId::from("v-b");
    let mut tie_a = tie_b.clone();
    tie_a.verification_id = VerificationId::from("v-a");
    tie_a.verifier_agent_id = AgentId::from("d");

    let agent = Agent::register(&claimed("b"), now);
    for v in [&later, &tie_b, &tie_a] {
        engine
            .commit_verification(VerificationCommit {
                verification: v,
                answer: &answer,
                agent: &agent,
                audit: &entry,
            })
            .await
            .unwrap();
    }

    let ids: Vec<_> = engine
        .verifications_for_answer(&answer.answer_id)
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.verification_id.0)
        .collect();
    assert_eq!(ids, vec!["v-a", "v-b", "a-later"]);
}

#[tokio::test]
async fn moderation_update_persists_status_and_priority() {
    let clock = ManualClock::fixed();
    let engine = StorageEngine::open_in_memory().unwrap();
    let now = clock.now();

    let canonical = sample_question("q1", "npm ERR! code ENOENT", "alice", now);
    let mut dup = sample_question("q2", "npm ERR! code ENOENT again", "alice", now);
    for q in [&canonical, &dup] {
        let answer = sample_answer(&q.question_id, "alice", now);
        let entry = audit("alice", AuditOperation::SubmitQuestion, &clock);
        engine
            .commit_submission(SubmissionCommit {
                question: Some(q),
                answer: &answer,
                audit: &entry,
            })
            .await
            .unwrap();
    }

    dup.status = QuestionStatus::Duplicate {
        canonical: canonical.question_id.clone(),
    };
    dup.priority = QuestionPriority::High;
    let entry = audit("mod", AuditOperation::MarkDuplicate, &clock).with_entity("q2");
    engine.commit_question_update(&dup, &entry).await.unwrap();

    let loaded = engine.get_question(&dup.question_id).await.unwrap().unwrap();
    assert_eq!(loaded.status.canonical(), Some(&canonical.question_id));
    assert_eq!(loaded.priority, QuestionPriority::High);
    assert_eq!(engine.list_questions().await.unwrap().len(), 2);
}

#[tokio::test]
async fn audit_since_filters_and_keeps_order() {
    let clock = ManualClock::fixed();
    let engine = StorageEngine::open_in_memory().unwrap();

    let first = audit("a", AuditOperation::SubmitQuestion, &clock);
    clock.advance_secs(600);
    let second = AuditEntry::new(
        AgentId::from("b"),
        AuditOperation::RecordVerification,
        AuditOutcome::RateLimited,
        clock.now(),
    )
    .with_details(serde_json::json!({ "retry_after_secs": 42 }));
    engine.append_audit(&first).await.unwrap();
    engine.append_audit(&second).await.unwrap();

    assert_eq!(
        engine.audit_since(first.timestamp).await.unwrap(),
        vec![first.clone(), second.clone()]
    );
    assert_eq!(engine.audit_since(second.timestamp).await.unwrap(), vec![second]);
}
