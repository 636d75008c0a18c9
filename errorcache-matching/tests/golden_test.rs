//! Golden signature pairs: same error, related, or different.

use errorcache_core::config::MatchingConfig;
use errorcache_matching::{similarity, Signature};
use test_fixtures::load_fixture_value;

#[test]
fn golden_signature_pairs() {
    let fixture = load_fixture_value("golden/matching/signature_pairs.json");
    let config = MatchingConfig::default();

    for pair in fixture["pairs"].as_array().unwrap() {
        let id = pair["id"].as_str().unwrap();
        let a = Signature::from_error(pair["a"].as_str().unwrap());
        let b = Signature::from_error(pair["b"].as_str().unwrap());
        let sim = similarity(&a, &b);
        let reverse = similarity(&b, &a);
        assert_eq!(sim, reverse, "Pair '{}': similarity not symmetric", id);

        match pair["expect"].as_str().unwrap() {
            "same" => assert!(
                sim >= config.match_threshold,
                "Pair '{}': expected same error, similarity {}", id, sim
            ),
            "related" => assert!(
                sim >= config.search_threshold && sim < config.match_threshold,
                "Pair '{}': expected related, similarity {}", id, sim
            ),
            "different" => assert!(
                sim < config.search_threshold,
                "Pair '{}': expected different, similarity {}", id, sim
            ),
            other => panic!("unknown expectation {other}"),
        }
    }
}
