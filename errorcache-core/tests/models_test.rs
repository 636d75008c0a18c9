use chrono::Utc;
use errorcache_core::models::*;

#[test]
fn trust_levels_are_ordered() {
    assert!(TrustLevel::Observer < TrustLevel::Verifier);
    assert!(TrustLevel::Verifier < TrustLevel::Contributor);
    assert!(TrustLevel::Contributor < TrustLevel::Trusted);
    for level in TrustLevel::ALL {
        assert_eq!(level.as_str().parse::<TrustLevel>().unwrap(), level);
    }
}

#[test]
fn registered_agent_starts_as_observer() {
    let identity = AgentIdentity::new("agent-a", true);
    let agent = Agent::register(&identity, Utc::now());
    assert_eq!(agent.trust_level, TrustLevel::Observer);
    assert_eq!(agent.verification_count, 0);
    assert_eq!(agent.verification_accuracy, 0.0);
    assert!(agent.claimed_by_human);
    assert!(!agent.suspended);
}

#[test]
fn ids_are_unique_and_display_raw() {
    let a = AnswerId::new();
    let b = AnswerId::new();
    assert_ne!(a, b);
    assert_eq!(QuestionId::from("q-1").to_string(), "q-1");
    let json = serde_json::to_string(&AgentId::from("agent-x")).unwrap();
    assert_eq!(json, "\"agent-x\"");
}

#[test]
fn error_category_parses_case_insensitively() {
    assert_eq!("SSL_TLS".parse::<ErrorCategory>().unwrap(), ErrorCategory::SslTls);
    assert_eq!(" dependency ".parse::<ErrorCategory>().unwrap(), ErrorCategory::Dependency);
    assert!("nonsense".parse::<ErrorCategory>().is_err());
    assert_eq!(ErrorCategory::default(), ErrorCategory::Other);
}

#[test]
fn question_status_serializes_with_state_tag() {
    let status = QuestionStatus::Duplicate {
        canonical: QuestionId::from("q-canon"),
    };
    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["state"], "duplicate");
    assert_eq!(json["canonical"], "q-canon");
    assert!(!status.is_open());
    assert_eq!(status.canonical().map(|c| c.as_str()), Some("q-canon"));
    assert!(QuestionStatus::default().is_open());
}

#[test]
fn answer_success_rate_absent_without_verifications() {
    let now = Utc::now();
    let mut answer = Answer {
        answer_id: AnswerId::new(),
        question_id: QuestionId::new(),
        owner_agent_id: AgentId::from("owner"),
        root_cause: "the requests package is not installed".into(),
        fix_approach: "install requests into the active environment".into(),
        commands: vec!["pip install requests".into()],
        created_at: now,
        current_score: 0.0,
        score_updated_at: now,
        verification_count: 0,
        pass_count: 0,
    };
    assert_eq!(answer.success_rate(), None);
    answer.verification_count = 4;
    answer.pass_count = 3;
    assert_eq!(answer.success_rate(), Some(0.75));
}

#[test]
fn evidence_emptiness_ignores_blank_strings() {
    assert!(Evidence::default().is_empty());
    let blank = Evidence {
        exit_codes: vec![],
        test_results: Some("   ".into()),
        notes: None,
    };
    assert!(blank.is_empty());
    let codes = Evidence {
        exit_codes: vec![0],
        ..Evidence::default()
    };
    assert!(!codes.is_empty());
}

#[test]
fn tiers_above_self_report_require_evidence() {
    assert!(!VerificationTier::SelfReport.requires_evidence());
    assert!(VerificationTier::EvidenceBacked.requires_evidence());
    assert!(VerificationTier::Reproducible.requires_evidence());
}

#[test]
fn audit_operations_map_to_rate_classes() {
    assert_eq!(
        AuditOperation::SubmitQuestion.rate_class(),
        Some(OperationClass::NewQuestion)
    );
    assert_eq!(
        AuditOperation::SubmitAnswer.rate_class(),
        Some(OperationClass::NewAnswer)
    );
    assert_eq!(
        AuditOperation::RecordVerification.rate_class(),
        Some(OperationClass::Verification)
    );
    assert_eq!(AuditOperation::MarkDuplicate.rate_class(), None);
    assert_eq!(AuditOperation::SubmitSolution.rate_class(), None);
}

#[test]
fn write_operations_are_flagged() {
    assert!(!Operation::Search.is_write());
    assert!(!Operation::Read.is_write());
    assert!(Operation::SubmitVerification.is_write());
    assert!(Operation::SetPriority.is_write());
}
