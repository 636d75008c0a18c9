use regex::Regex;
use std::sync::LazyLock;

/// A compiled credential detection pattern.
pub struct SecretPattern {
    pub name: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
}

macro_rules! secret_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── ErrorCache ─────────────────────────────────────────────────────────────
secret_pattern!(RE_ERRORCACHE_API_KEY, r"\bec_sk_[A-Za-z0-9]{32}");

// ── Bearer tokens ──────────────────────────────────────────────────────────
secret_pattern!(
    RE_BEARER_TOKEN,
    r"(?i)\bbearer\s+(?P<secret>[A-Za-z0-9\-._~+/]{20,}=*)"
);

// ── AWS ────────────────────────────────────────────────────────────────────
secret_pattern!(RE_AWS_ACCESS_KEY, r"\b(?:AKIA|ASIA)[0-9A-Z]{16}\b");
secret_pattern!(
    RE_AWS_SECRET_KEY,
    r#"(?i)(?:aws_secret_access_key|aws_secret)\s*[=:]\s*['"]?(?P<secret>[A-Za-z0-9/+=]{40})['"]?"#
);

// ── JWT ────────────────────────────────────────────────────────────────────
secret_pattern!(
    RE_JWT,
    r"\beyJ[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}\b"
);

// ── Private keys (PEM) ────────────────────────────────────────────────────
secret_pattern!(
    RE_PRIVATE_KEY,
    r"-----BEGIN (?:RSA |EC |DSA |OPENSSH |ENCRYPTED )?PRIVATE KEY-----"
);

// ── GitHub ─────────────────────────────────────────────────────────────────
secret_pattern!(RE_GITHUB_TOKEN, r"\bgh[pousr]_[A-Za-z0-9]{36}\b");
secret_pattern!(RE_GITHUB_FINE_GRAINED, r"\bgithub_pat_[A-Za-z0-9_]{60,}\b");

// ── GitLab ─────────────────────────────────────────────────────────────────
secret_pattern!(RE_GITLAB_PAT, r"\bglpat-[A-Za-z0-9_-]{20,}\b");

// ── Slack ──────────────────────────────────────────────────────────────────
secret_pattern!(RE_SLACK_TOKEN, r"\bxox[abposr]-[0-9A-Za-z-]{10,}\b");
secret_pattern!(
    RE_SLACK_WEBHOOK,
    r"https://hooks\.slack\.com/services/T[A-Z0-9]+/B[A-Z0-9]+/[A-Za-z0-9]+"
);

// ── Stripe ─────────────────────────────────────────────────────────────────
secret_pattern!(RE_STRIPE_SECRET, r"\b(?:sk|rk)_(?:live|test)_[A-Za-z0-9]{24,}\b");

// ── npm / PyPI ─────────────────────────────────────────────────────────────
secret_pattern!(RE_NPM_TOKEN, r"\bnpm_[A-Za-z0-9]{36}\b");
secret_pattern!(RE_PYPI_TOKEN, r"\bpypi-[A-Za-z0-9_-]{50,}\b");

// ── LLM providers ──────────────────────────────────────────────────────────
secret_pattern!(RE_ANTHROPIC_KEY, r"\bsk-ant-[A-Za-z0-9_-]{20,}");
secret_pattern!(RE_OPENAI_KEY, r"\bsk-(?:proj-)?[A-Za-z0-9_-]{20,}");

// ── GCP ────────────────────────────────────────────────────────────────────
secret_pattern!(RE_GCP_API_KEY, r"\bAIza[0-9A-Za-z_-]{35}\b");

// ── Credentials embedded in connection URLs ────────────────────────────────
secret_pattern!(
    RE_URL_CREDENTIALS,
    r"(?i)\b[a-z][a-z0-9+.-]*://[^\s:/@]+:(?P<secret>[^\s@/]+)@[^\s]+"
);

// ── Generic assignments ────────────────────────────────────────────────────
secret_pattern!(
    RE_PASSWORD_ASSIGN,
    r#"(?i)\b(?:password|passwd|pwd)\s*(?:=\s*['"]?|:\s*['"])(?P<secret>[^'"\s]{6,})"#
);
secret_pattern!(
    RE_GENERIC_API_KEY,
    r#"(?i)\b(?:api[_-]?key|apikey|x-api-key)\s*(?:=\s*['"]?|:\s*['"]?)(?P<secret>[A-Za-z0-9_\-./+=]{16,})"#
);
secret_pattern!(
    RE_GENERIC_SECRET,
    r#"(?i)\b(?:secret|secret[_-]?key|client[_-]?secret|auth[_-]?token|access[_-]?token)\s*(?:=\s*['"]?|:\s*['"])(?P<secret>[A-Za-z0-9_\-./+=]{16,})"#
);

/// All credential patterns, most specific first. The first pattern that
/// matches names the rejection.
pub fn all_patterns() -> Vec<SecretPattern> {
    vec![
        SecretPattern {
            name: "errorcache_api_key",
            regex: &RE_ERRORCACHE_API_KEY,
        },
        SecretPattern {
            name: "private_key",
            regex: &RE_PRIVATE_KEY,
        },
        SecretPattern {
            name: "aws_access_key",
            regex: &RE_AWS_ACCESS_KEY,
        },
        SecretPattern {
            name: "aws_secret_key",
            regex: &RE_AWS_SECRET_KEY,
        },
        SecretPattern {
            name: "github_token",
            regex: &RE_GITHUB_TOKEN,
        },
        SecretPattern {
            name: "github_fine_grained_pat",
            regex: &RE_GITHUB_FINE_GRAINED,
        },
        SecretPattern {
            name: "gitlab_pat",
            regex: &RE_GITLAB_PAT,
        },
        SecretPattern {
            name: "slack_token",
            regex: &RE_SLACK_TOKEN,
        },
        SecretPattern {
            name: "slack_webhook",
            regex: &RE_SLACK_WEBHOOK,
        },
        SecretPattern {
            name: "stripe_secret",
            regex: &RE_STRIPE_SECRET,
        },
        SecretPattern {
            name: "npm_token",
            regex: &RE_NPM_TOKEN,
        },
        SecretPattern {
            name: "pypi_token",
            regex: &RE_PYPI_TOKEN,
        },
        SecretPattern {
            name: "anthropic_api_key",
            regex: &RE_ANTHROPIC_KEY,
        },
        SecretPattern {
            name: "openai_api_key",
            regex: &RE_OPENAI_KEY,
        },
        SecretPattern {
            name: "gcp_api_key",
            regex: &RE_GCP_API_KEY,
        },
        SecretPattern {
            name: "jwt",
            regex: &RE_JWT,
        },
        SecretPattern {
            name: "bearer_token",
            regex: &RE_BEARER_TOKEN,
        },
        SecretPattern {
            name: "url_credentials",
            regex: &RE_URL_CREDENTIALS,
        },
        SecretPattern {
            name: "password_assign",
            regex: &RE_PASSWORD_ASSIGN,
        },
        SecretPattern {
            name: "generic_api_key",
            regex: &RE_GENERIC_API_KEY,
        },
        SecretPattern {
            name: "generic_secret",
            regex: &RE_GENERIC_SECRET,
        },
    ]
}
