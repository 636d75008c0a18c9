use chrono::{Duration, TimeZone, Utc};
use errorcache_core::config::ScoringConfig;
use errorcache_core::models::*;
use errorcache_scoring::compute;
use proptest::prelude::*;
use test_fixtures::sample_verification;

fn outcome() -> impl Strategy<Value = VerificationOutcome> {
    prop_oneof![
        Just(VerificationOutcome::Pass),
        Just(VerificationOutcome::Fail),
        Just(VerificationOutcome::Partial)
    ]
}

fn tier() -> impl Strategy<Value = VerificationTier> {
    prop_oneof![
        Just(VerificationTier::SelfReport),
        Just(VerificationTier::EvidenceBacked),
        Just(VerificationTier::Reproducible)
    ]
}

proptest! {
    #[test]
    fn score_is_finite_non_negative_and_order_independent(
        specs in proptest::collection::vec((0usize..4, outcome(), tier(), 0usize..3, 0i64..100_000), 0..12),
        elapsed in 0i64..10_000_000,
    ) {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let answer = AnswerId::new();
        let envs = ["linux", "macos", "windows"];
        let vs: Vec<Verification> = specs
            .iter()
            .map(|(agent, o, t, env, offset)| {
                sample_verification(&answer, &format!("agent-{agent}"), *o, *t, envs[*env], base + Duration::seconds(*offset))
            })
            .collect();
        let at = base + Duration::seconds(100_000 + elapsed);
        let config = ScoringConfig::default();

        let forward = compute(base, &vs, at, &config);
        let mut reversed = vs.clone();
        reversed.reverse();
        let backward = compute(base, &reversed, at, &config);

        prop_assert!(forward.is_finite());
        prop_assert!(forward >= 0.0);
        prop_assert!((forward - backward).abs() < 1e-9);
    }
}
