use serde::{Deserialize, Serialize};

/// An operator-supplied secret pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraPattern {
    pub name: String,
    pub regex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Treat template-looking matches (`<TOKEN>`, `${KEY}`, `your_key`) as non-secrets.
    pub skip_placeholders: bool,
    pub extra_patterns: Vec<ExtraPattern>,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            skip_placeholders: true,
            extra_patterns: Vec::new(),
        }
    }
}
