use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use errorcache_core::config::{RateLimitConfig, WindowLimit};
use errorcache_core::errors::ErrorCacheError;
use errorcache_core::models::{AgentId, OperationClass};
use errorcache_ratelimit::{RateDecision, RateSlot, SlidingWindowLimiter};

use OperationClass::*;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

fn secs(n: i64) -> chrono::Duration {
    chrono::Duration::seconds(n)
}

fn limiter() -> SlidingWindowLimiter {
    SlidingWindowLimiter::new(&RateLimitConfig::default())
}

#[test]
fn second_new_question_within_ten_minutes_is_limited() {
    let limiter = limiter();
    let a = AgentId::from("a");

    assert_eq!(
        limiter.check_and_record(&a, NewQuestion, t0()),
        RateDecision::Allowed {
            remaining: 0,
            recorded_at: t0()
        }
    );
    let second = limiter.check_and_record(&a, NewQuestion, t0() + secs(360));
    assert_eq!(
        second,
        RateDecision::Limited {
            retry_after: Duration::from_secs(240)
        }
    );

    // Exactly one window later the first event has expired.
    assert!(limiter.allow(&a, NewQuestion, t0() + secs(600)));
}

#[test]
fn classes_and_agents_are_independent() {
    let limiter = limiter();
    let a = AgentId::from("a");
    let b = AgentId::from("b");

    assert!(limiter.allow(&a, NewQuestion, t0()));
    assert!(!limiter.allow(&a, NewQuestion, t0()));
    assert!(limiter.allow(&a, NewAnswer, t0()));
    assert!(limiter.allow(&a, Verification, t0()));
    assert!(limiter.allow(&b, NewQuestion, t0()));
}

#[test]
fn verification_window_allows_twenty_per_hour() {
    let limiter = limiter();
    let a = AgentId::from("a");
    for i in 0..20 {
        let decision = limiter.check_and_record(&a, Verification, t0() + secs(i * 60));
        assert_eq!(
            decision,
            RateDecision::Allowed {
                remaining: 19 - i as u32,
                recorded_at: t0() + secs(i * 60)
            }
        );
    }
    let denied = limiter.check_and_record(&a, Verification, t0() + secs(1_200));
    assert_eq!(
        denied,
        RateDecision::Limited {
            retry_after: Duration::from_secs(2_400)
        }
    );
    assert_eq!(limiter.in_window(&a, Verification, t0() + secs(1_200)), 20);
    // Oldest expires at t0 + 3600; the one after at t0 + 3660.
    assert!(limiter.allow(&a, Verification, t0() + secs(3_600)));
    assert!(!limiter.allow(&a, Verification, t0() + secs(3_601)));
}

#[test]
fn backwards_clock_is_clamped_to_newest_event() {
    let config = RateLimitConfig {
        new_answer: WindowLimit::new(2, 100),
        ..RateLimitConfig::default()
    };
    let limiter = SlidingWindowLimiter::new(&config);
    let a = AgentId::from("a");

    assert!(limiter.allow(&a, NewAnswer, t0() + secs(50)));
    // Earlier reading: treated as t0 + 50.
    assert!(limiter.allow(&a, NewAnswer, t0()));
    let denied = limiter.check_and_record(&a, NewAnswer, t0() + secs(10));
    assert_eq!(
        denied,
        RateDecision::Limited {
            retry_after: Duration::from_secs(100)
        }
    );
}

#[test]
fn limited_decision_maps_to_error() {
    let decision = RateDecision::Limited {
        retry_after: Duration::from_secs(5),
    };
    match decision.into_result(NewAnswer).unwrap_err() {
        ErrorCacheError::RateLimited { class, retry_after } => {
            assert_eq!(class, NewAnswer);
            assert_eq!(retry_after, Duration::from_secs(5));
        }
        other => panic!("unexpected {other:?}"),
    }
    let allowed = RateDecision::Allowed {
        remaining: 3,
        recorded_at: t0(),
    };
    assert_eq!(
        allowed.into_result(NewAnswer).unwrap(),
        RateSlot {
            remaining: 3,
            recorded_at: t0()
        }
    );
}

#[test]
fn release_returns_the_slot() {
    let limiter = limiter();
    let a = AgentId::from("a");
    assert!(limiter.allow(&a, NewQuestion, t0()));
    limiter.release(&a, NewQuestion, t0());
    assert!(limiter.allow(&a, NewQuestion, t0() + secs(1)));
}

#[test]
fn release_after_clamped_record_frees_that_slot() {
    let config = RateLimitConfig {
        new_answer: WindowLimit::new(2, 100),
        ..RateLimitConfig::default()
    };
    let limiter = SlidingWindowLimiter::new(&config);
    let a = AgentId::from("a");

    assert!(limiter.allow(&a, NewAnswer, t0() + secs(50)));
    // Stale reading: recorded at the newest event, not at t0.
    let slot = limiter
        .check_and_record(&a, NewAnswer, t0())
        .into_result(NewAnswer)
        .unwrap();
    assert_eq!(slot.recorded_at, t0() + secs(50));
    assert_eq!(limiter.in_window(&a, NewAnswer, t0() + secs(50)), 2);

    limiter.release(&a, NewAnswer, slot.recorded_at);
    assert_eq!(limiter.in_window(&a, NewAnswer, t0() + secs(50)), 1);
    assert!(limiter.allow(&a, NewAnswer, t0() + secs(60)));
}

#[test]
fn rebuild_restores_only_live_events() {
    let limiter = limiter();
    let a = AgentId::from("a");
    let now = t0() + secs(3_600);
    limiter.rebuild(
        vec![
            (a.clone(), NewQuestion, now - secs(300)),
            (a.clone(), NewQuestion, now - secs(900)),
            (a.clone(), Verification, now - secs(10)),
        ],
        now,
    );
    assert_eq!(limiter.in_window(&a, NewQuestion, now), 1);
    assert_eq!(limiter.in_window(&a, Verification, now), 1);
    assert_eq!(
        limiter.check_and_record(&a, NewQuestion, now),
        RateDecision::Limited {
            retry_after: Duration::from_secs(300)
        }
    );
}

#[test]
fn prune_drops_expired_windows() {
    let limiter = limiter();
    assert!(limiter.allow(&AgentId::from("a"), NewQuestion, t0()));
    assert!(limiter.allow(&AgentId::from("b"), Verification, t0()));
    assert_eq!(limiter.window_count(), 2);

    limiter.prune(t0() + secs(601));
    assert_eq!(limiter.window_count(), 1);
    limiter.prune(t0() + secs(3_601));
    assert_eq!(limiter.window_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_checks_never_exceed_the_limit() {
    let limiter = Arc::new(limiter());
    let agent = AgentId::from("racer");

    let mut handles = Vec::new();
    for _ in 0..64 {
        let limiter = Arc::clone(&limiter);
        let agent = agent.clone();
        handles.push(tokio::spawn(async move {
            limiter.allow(&agent, NewAnswer, t0())
        }));
    }

    let mut allowed = 0;
    for h in handles {
        if h.await.unwrap() {
            allowed += 1;
        }
    }
    assert_eq!(allowed, 10);
}
