//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    MatchingConfig, ObservabilityConfig, PrivacyConfig, RateLimitConfig, ScoringConfig,
    StorageConfig, TrustConfig, WindowLimit,
};
use crate::constants::{MAX_SEARCH_LIMIT, MAX_WINDOW_SECS};
use crate::errors::ConfigError;

/// Aggregates every sub-config.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ERRORCACHE_*`)
/// 2. TOML file passed to [`ErrorCacheConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorCacheConfig {
    pub storage: StorageConfig,
    pub trust: TrustConfig,
    pub scoring: ScoringConfig,
    pub rate_limit: RateLimitConfig,
    pub matching: MatchingConfig,
    pub privacy: PrivacyConfig,
    pub observability: ObservabilityConfig,
}

impl ErrorCacheConfig {
    /// Load defaults, then the optional TOML file, then environment overrides,
    /// and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Missing tables and keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialize>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `ERRORCACHE_*` overrides using `lookup` to read variables.
    /// Unparseable values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("ERRORCACHE_DB_PATH") {
            self.storage.db_path = PathBuf::from(val);
        }
        if let Some(v) = lookup("ERRORCACHE_READ_POOL_SIZE").and_then(|s| s.parse().ok()) {
            self.storage.read_pool_size = v;
        }
        if let Some(v) = lookup("ERRORCACHE_MATCH_THRESHOLD").and_then(|s| s.parse().ok()) {
            self.matching.match_threshold = v;
        }
        if let Some(v) = lookup("ERRORCACHE_SEARCH_THRESHOLD").and_then(|s| s.parse().ok()) {
            self.matching.search_threshold = v;
        }
        if let Some(v) = lookup("ERRORCACHE_SEARCH_LIMIT").and_then(|s| s.parse().ok()) {
            self.matching.default_search_limit = v;
        }
        if let Some(v) = lookup("ERRORCACHE_SKIP_PLACEHOLDERS").and_then(|s| s.parse().ok()) {
            self.privacy.skip_placeholders = v;
        }
        if let Some(v) = lookup("ERRORCACHE_LOG_JSON").and_then(|s| s.parse().ok()) {
            self.observability.json = v;
        }
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.read_pool_size == 0 {
            return Err(invalid("storage.read_pool_size", "must be at least 1"));
        }

        let trust = &self.trust;
        unit_interval("trust.contributor_min_accuracy", trust.contributor_min_accuracy)?;
        unit_interval("trust.trusted_min_accuracy", trust.trusted_min_accuracy)?;
        if trust.trusted_min_verifications < trust.contributor_min_verifications {
            return Err(invalid(
                "trust.trusted_min_verifications",
                "must be >= trust.contributor_min_verifications",
            ));
        }
        if trust.trusted_min_accuracy < trust.contributor_min_accuracy {
            return Err(invalid(
                "trust.trusted_min_accuracy",
                "must be >= trust.contributor_min_accuracy",
            ));
        }

        let scoring = &self.scoring;
        for (field, value) in [
            ("scoring.self_report_weight", scoring.self_report_weight),
            ("scoring.evidence_backed_weight", scoring.evidence_backed_weight),
            ("scoring.reproducible_weight", scoring.reproducible_weight),
            ("scoring.repeat_verifier_weight", scoring.repeat_verifier_weight),
            ("scoring.pass_weight", scoring.pass_weight),
            ("scoring.partial_weight", scoring.partial_weight),
            ("scoring.fail_weight", scoring.fail_weight),
            ("scoring.diversity_step", scoring.diversity_step),
        ] {
            non_negative(field, value)?;
        }
        if !scoring.diversity_cap.is_finite() || scoring.diversity_cap < 1.0 {
            return Err(invalid("scoring.diversity_cap", "must be >= 1.0"));
        }
        unit_interval("scoring.recency_floor", scoring.recency_floor)?;
        if !scoring.recency_decay_days.is_finite() || scoring.recency_decay_days <= 0.0 {
            return Err(invalid("scoring.recency_decay_days", "must be greater than 0"));
        }

        for (field, limit) in [
            ("rate_limit.new_question", self.rate_limit.new_question),
            ("rate_limit.new_answer", self.rate_limit.new_answer),
            ("rate_limit.verification", self.rate_limit.verification),
        ] {
            window(field, limit)?;
        }

        let matching = &self.matching;
        unit_interval("matching.match_threshold", matching.match_threshold)?;
        unit_interval("matching.search_threshold", matching.search_threshold)?;
        if matching.search_threshold > matching.match_threshold {
            return Err(invalid(
                "matching.search_threshold",
                "must be <= matching.match_threshold",
            ));
        }
        if matching.default_search_limit == 0 || matching.default_search_limit > MAX_SEARCH_LIMIT {
            return Err(invalid(
                "matching.default_search_limit",
                &format!("must be between 1 and {MAX_SEARCH_LIMIT}"),
            ));
        }

        for pattern in &self.privacy.extra_patterns {
            if pattern.name.trim().is_empty() {
                return Err(invalid("privacy.extra_patterns.name", "must not be empty"));
            }
            if let Err(e) = regex::Regex::new(&pattern.regex) {
                return Err(invalid(
                    &format!("privacy.extra_patterns.{}", pattern.name),
                    &e.to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be between 0.0 and 1.0"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a finite value >= 0.0"))
    }
}

fn window(field: &str, limit: WindowLimit) -> Result<(), ConfigError> {
    if limit.max_events == 0 {
        return Err(invalid(field, "max_events must be at least 1"));
    }
    if limit.window_secs == 0 || limit.window_secs > MAX_WINDOW_SECS {
        return Err(invalid(
            field,
            &format!("window_secs must be between 1 and {MAX_WINDOW_SECS}"),
        ));
    }
    Ok(())
}
