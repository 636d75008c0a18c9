//! Golden dataset tests for the secret scanner.

use errorcache_privacy::{ScanOutcome, SecretScanner};
use test_fixtures::load_fixture_value;

#[test]
fn golden_rejected_samples_name_expected_pattern() {
    let fixture = load_fixture_value("golden/privacy/secret_samples.json");
    let scanner = SecretScanner::new();

    for sample in fixture["rejected"].as_array().unwrap() {
        let id = sample["id"].as_str().unwrap();
        let text = sample["text"].as_str().unwrap();
        let expected = sample["pattern"].as_str().unwrap();

        match scanner.scan(text) {
            ScanOutcome::Rejected(r) => assert_eq!(
                r.pattern, expected,
                "Sample '{}': wrong pattern", id
            ),
            ScanOutcome::Clean => panic!("Sample '{}': expected rejection", id),
        }
    }
}

#[test]
fn golden_clean_samples_pass() {
    let fixture = load_fixture_value("golden/privacy/secret_samples.json");
    let scanner = SecretScanner::new();

    for sample in fixture["clean"].as_array().unwrap() {
        let id = sample["id"].as_str().unwrap();
        let text = sample["text"].as_str().unwrap();
        assert_eq!(
            scanner.scan(text),
            ScanOutcome::Clean,
            "Sample '{}' should be clean, found {:?}",
            id,
            scanner.find_first(text)
        );
    }
}
