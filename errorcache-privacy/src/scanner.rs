use errorcache_core::config::PrivacyConfig;
use errorcache_core::errors::{ConfigError, ErrorCacheError};
use regex::Regex;

use crate::patterns;
use crate::placeholder::looks_like_placeholder;

/// Field name reported by [`SecretScanner::scan`], which has no field context.
const UNNAMED_FIELD: &str = "text";

/// Where a credential was found. Offsets are byte positions of the credential
/// itself inside the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretMatch {
    pub pattern: String,
    pub start: usize,
    pub end: usize,
}

/// Why a submission was refused. Never contains the secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub field: String,
    pub pattern: String,
}

impl Rejection {
    pub fn reason(&self) -> String {
        format!("{} contains a credential matching {}", self.field, self.pattern)
    }
}

impl From<Rejection> for ErrorCacheError {
    fn from(r: Rejection) -> Self {
        ErrorCacheError::RejectedContent {
            field: r.field,
            pattern: r.pattern,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Clean,
    Rejected(Rejection),
}

impl ScanOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// `Err(RejectedContent)` for a rejection.
    pub fn into_result(self) -> Result<(), ErrorCacheError> {
        match self {
            Self::Clean => Ok(()),
            Self::Rejected(r) => Err(r.into()),
        }
    }
}

/// Credential scanner over the built-in pattern table plus operator patterns.
pub struct SecretScanner {
    skip_placeholders: bool,
    extra: Vec<(String, Regex)>,
}

impl SecretScanner {
    /// Built-in patterns only, placeholders skipped.
    pub fn new() -> Self {
        Self {
            skip_placeholders: true,
            extra: Vec::new(),
        }
    }

    pub fn from_config(config: &PrivacyConfig) -> Result<Self, ConfigError> {
        let mut extra = Vec::with_capacity(config.extra_patterns.len());
        for p in &config.extra_patterns {
            let re = Regex::new(&p.regex).map_err(|e| ConfigError::ValidationFailed {
                field: format!("privacy.extra_patterns.{}", p.name),
                message: e.to_string(),
            })?;
            extra.push((p.name.clone(), re));
        }
        Ok(Self {
            skip_placeholders: config.skip_placeholders,
            extra,
        })
    }

    /// Scan a single text.
    pub fn scan(&self, text: &str) -> ScanOutcome {
        self.scan_fields(&[(UNNAMED_FIELD, text)])
    }

    /// Scan named fields in order. The first credential found rejects the set.
    pub fn scan_fields(&self, fields: &[(&str, &str)]) -> ScanOutcome {
        for (field, text) in fields {
            if let Some(m) = self.find_first(text) {
                return ScanOutcome::Rejected(Rejection {
                    field: (*field).to_string(),
                    pattern: m.pattern,
                });
            }
        }
        ScanOutcome::Clean
    }

    /// First credential in `text`, in pattern-table order.
    pub fn find_first(&self, text: &str) -> Option<SecretMatch> {
        if text.is_empty() {
            return None;
        }
        for pat in patterns::all_patterns() {
            let Some(re) = pat.regex.as_ref() else { continue };
            if let Some(m) = self.first_real_match(pat.name, re, text) {
                return Some(m);
            }
        }
        self.extra
            .iter()
            .find_map(|(name, re)| self.first_real_match(name, re, text))
    }

    /// Every credential in `text`, one entry per pattern hit.
    pub fn find_all(&self, text: &str) -> Vec<SecretMatch> {
        let mut out = Vec::new();
        for pat in patterns::all_patterns() {
            let Some(re) = pat.regex.as_ref() else { continue };
            self.collect(pat.name, re, text, &mut out);
        }
        for (name, re) in &self.extra {
            self.collect(name, re, text, &mut out);
        }
        out.sort_by_key(|m| (m.start, m.end));
        out
    }

    fn first_real_match(&self, name: &str, re: &Regex, text: &str) -> Option<SecretMatch> {
        re.captures_iter(text).find_map(|caps| {
            let span = caps.name("secret").or_else(|| caps.get(0))?;
            if self.skip_placeholders && looks_like_placeholder(span.as_str()) {
                return None;
            }
            Some(SecretMatch {
                pattern: name.to_string(),
                start: span.start(),
                end: span.end(),
            })
        })
    }

    fn collect(&self, name: &str, re: &Regex, text: &str, out: &mut Vec<SecretMatch>) {
        for caps in re.captures_iter(text) {
            let Some(span) = caps.name("secret").or_else(|| caps.get(0)) else {
                continue;
            };
            if self.skip_placeholders && looks_like_placeholder(span.as_str()) {
                continue;
            }
            out.push(SecretMatch {
                pattern: name.to_string(),
                start: span.start(),
                end: span.end(),
            });
        }
    }
}

impl Default for SecretScanner {
    fn default() -> Self {
        Self::new()
    }
}
