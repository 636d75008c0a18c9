use errorcache_privacy::{ScanOutcome, SecretScanner};
use proptest::prelude::*;

proptest! {
    #[test]
    fn any_errorcache_key_is_rejected(
        suffix in "[A-Za-z0-9]{32}",
        prefix in "[a-z ]{0,20}",
    ) {
        let text = format!("{prefix} ec_sk_{suffix}");
        let scanner = SecretScanner::new();
        prop_assert!(matches!(scanner.scan(&text), ScanOutcome::Rejected(_)));
    }

    #[test]
    fn rejection_reason_never_echoes_secret(suffix in "[A-Za-z0-9]{36}") {
        let token = format!("ghp_{suffix}");
        let scanner = SecretScanner::new();
        let ScanOutcome::Rejected(r) = scanner.scan(&format!("token {token}")) else {
            return Err(TestCaseError::fail("expected rejection"));
        };
        prop_assert!(!r.reason().contains(&token));
        prop_assert!(!r.pattern.contains(&token));
    }

    #[test]
    fn plain_words_are_clean(words in proptest::collection::vec("[a-z]{1,8}", 0..20)) {
        let text = words.join(" ");
        prop_assert!(SecretScanner::new().scan(&text).is_clean());
    }
}
