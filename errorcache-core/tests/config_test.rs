use std::collections::HashMap;
use std::path::PathBuf;

use errorcache_core::config::*;
use errorcache_core::errors::ConfigError;
use errorcache_core::models::OperationClass;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = ErrorCacheConfig::from_toml("").unwrap();

    assert_eq!(config.storage.db_path, PathBuf::from("errorcache.db"));
    assert_eq!(config.storage.read_pool_size, 4);

    assert_eq!(config.trust.contributor_min_verifications, 10);
    assert_eq!(config.trust.contributor_min_accuracy, 0.6);
    assert_eq!(config.trust.trusted_min_verifications, 50);
    assert_eq!(config.trust.trusted_min_accuracy, 0.8);

    assert_eq!(config.scoring.self_report_weight, 0.1);
    assert_eq!(config.scoring.evidence_backed_weight, 0.5);
    assert_eq!(config.scoring.reproducible_weight, 1.0);
    assert_eq!(config.scoring.repeat_verifier_weight, 0.1);
    assert_eq!(config.scoring.recency_floor, 0.2);
    assert_eq!(config.scoring.recency_decay_days, 30.0);

    let q = config.rate_limit.limit_for(OperationClass::NewQuestion);
    assert_eq!((q.max_events, q.window_secs), (1, 600));
    let a = config.rate_limit.limit_for(OperationClass::NewAnswer);
    assert_eq!((a.max_events, a.window_secs), (10, 3_600));
    let v = config.rate_limit.limit_for(OperationClass::Verification);
    assert_eq!((v.max_events, v.window_secs), (20, 3_600));

    assert_eq!(config.matching.match_threshold, 0.6);
    assert_eq!(config.matching.search_threshold, 0.3);
    assert_eq!(config.matching.default_search_limit, 5);

    assert!(config.privacy.skip_placeholders);
    assert!(config.privacy.extra_patterns.is_empty());

    assert_eq!(config.observability.log_filter, "info");
    config.validate().unwrap();
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[storage]
db_path = "/custom/errors.db"

[rate_limit.new_question]
max_events = 3
window_secs = 60

[[privacy.extra_patterns]]
name = "internal_token"
regex = "itk_[a-z0-9]{16}"
"#;
    let config = ErrorCacheConfig::from_toml(toml).unwrap();
    assert_eq!(config.storage.db_path, PathBuf::from("/custom/errors.db"));
    assert_eq!(config.storage.read_pool_size, 4);
    assert_eq!(config.rate_limit.new_question.max_events, 3);
    assert_eq!(config.rate_limit.new_answer.max_events, 10);
    assert_eq!(config.privacy.extra_patterns.len(), 1);
    config.validate().unwrap();
}

#[test]
fn config_toml_roundtrip_keeps_values() {
    let mut config = ErrorCacheConfig::default();
    config.matching.match_threshold = 0.75;
    let text = config.to_toml().unwrap();
    let back = ErrorCacheConfig::from_toml(&text).unwrap();
    assert_eq!(back.matching.match_threshold, 0.75);
    assert_eq!(back.scoring.diversity_cap, 2.0);
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = ErrorCacheConfig::from_toml("[storage\ndb_path = 1").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn env_overrides_take_precedence() {
    let vars: HashMap<&str, &str> = [
        ("ERRORCACHE_DB_PATH", "/tmp/override.db"),
        ("ERRORCACHE_MATCH_THRESHOLD", "0.9"),
        ("ERRORCACHE_READ_POOL_SIZE", "not-a-number"),
    ]
    .into_iter()
    .collect();

    let mut config = ErrorCacheConfig::default();
    config.apply_env_overrides(|k| vars.get(k).map(|v| v.to_string()));

    assert_eq!(config.storage.db_path, PathBuf::from("/tmp/override.db"));
    assert_eq!(config.matching.match_threshold, 0.9);
    // Unparseable values are ignored.
    assert_eq!(config.storage.read_pool_size, 4);
}

#[test]
fn load_reads_file_then_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("errorcache.toml");
    std::fs::write(&path, "[matching]\nsearch_threshold = 0.4\n").unwrap();

    let config = ErrorCacheConfig::load(Some(&path)).unwrap();
    assert_eq!(config.matching.search_threshold, 0.4);
}

#[test]
fn load_missing_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = ErrorCacheConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

fn validation_field(toml: &str) -> String {
    let config = ErrorCacheConfig::from_toml(toml).unwrap();
    match config.validate().unwrap_err() {
        ConfigError::ValidationFailed { field, .. } => field,
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn validate_rejects_out_of_range_values() {
    assert_eq!(
        validation_field("[matching]\nmatch_threshold = 1.5"),
        "matching.match_threshold"
    );
    assert_eq!(
        validation_field("[matching]\nsearch_threshold = 0.7\nmatch_threshold = 0.6"),
        "matching.search_threshold"
    );
    assert_eq!(
        validation_field("[trust]\ntrusted_min_verifications = 5"),
        "trust.trusted_min_verifications"
    );
    assert_eq!(
        validation_field("[trust]\ntrusted_min_accuracy = 0.5"),
        "trust.trusted_min_accuracy"
    );
    assert_eq!(
        validation_field("[scoring]\nrecency_decay_days = 0.0"),
        "scoring.recency_decay_days"
    );
    assert_eq!(
        validation_field("[scoring]\ndiversity_cap = 0.5"),
        "scoring.diversity_cap"
    );
    assert_eq!(
        validation_field("[rate_limit.verification]\nmax_events = 0\nwindow_secs = 60"),
        "rate_limit.verification"
    );
    assert_eq!(
        validation_field("[storage]\nread_pool_size = 0"),
        "storage.read_pool_size"
    );
}

#[test]
fn validate_rejects_bad_extra_pattern_regex() {
    let field = validation_field(
        "[[privacy.extra_patterns]]\nname = \"broken\"\nregex = \"([unclosed\"",
    );
    assert_eq!(field, "privacy.extra_patterns.broken");
}
