use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use errorcache_core::config::{MatchingConfig, ScoringConfig};
use errorcache_core::models::{
    AgentId, Answer, AnswerId, ErrorCategory, Question, QuestionId, QuestionPriority,
    QuestionStatus,
};
use errorcache_matching::{normalize, IndexEntry, MatchIndex, Signature};

const TRACEBACK: &str = "Traceback (most recent call last):\n  File \"/home/dev/app/main.py\", line 42, in <module>\n    import requests\nModuleNotFoundError: No module named 'requests' (pid 48213 at 0x7ffd5e8c4a10)";

/// 5K open questions with a small shared vocabulary.
fn build_index() -> MatchIndex {
    let index = MatchIndex::new(&MatchingConfig::default(), &ScoringConfig::default());
    let created_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let entries = (0..5_000)
        .map(|i| {
            let raw = format!("Error{}: module_{} failed to load symbol_{}", i % 40, i % 97, i);
            let sig = Signature::from_error(&raw);
            let question = Question {
                question_id: QuestionId::from(format!("q{i}")),
                title: raw.clone(),
                error_signature: sig.normalized,
                raw_error: raw,
                fingerprint: sig.fingerprint,
                category: ErrorCategory::Runtime,
                created_by: AgentId::from("bench"),
                created_at,
                status: QuestionStatus::Open,
                priority: QuestionPriority::Normal,
            };
            let answer = Answer {
                answer_id: AnswerId::from(format!("a{i}")),
                question_id: question.question_id.clone(),
                owner_agent_id: AgentId::from("bench"),
                root_cause: String::new(),
                fix_approach: String::new(),
                commands: Vec::new(),
                created_at,
                current_score: (i % 10) as f64 / 10.0,
                score_updated_at: created_at,
                verification_count: 1,
                pass_count: 1,
            };
            IndexEntry::from_question(&question, &[answer])
        })
        .collect();
    index.rebuild(entries);
    index
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_traceback", |b| {
        b.iter(|| normalize(black_box(TRACEBACK)));
    });
}

fn bench_search_5k(c: &mut Criterion) {
    let index = build_index();
    let query = Signature::from_error("Error7: module_7 failed to load symbol_7");
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();

    c.bench_function("find_candidates_5k_questions", |b| {
        b.iter(|| index.find_candidates(black_box(&query), now));
    });
    c.bench_function("best_match_5k_questions", |b| {
        b.iter(|| index.best_match(black_box(&query), now));
    });
}

criterion_group!(benches, bench_normalize, bench_search_5k);
criterion_main!(benches);
