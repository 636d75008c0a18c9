//! Configuration for every ErrorCache subsystem.

pub mod defaults;
mod errorcache_config;
mod matching_config;
mod observability_config;
mod privacy_config;
mod rate_limit_config;
mod scoring_config;
mod storage_config;
mod trust_config;

pub use errorcache_config::ErrorCacheConfig;
pub use matching_config::MatchingConfig;
pub use observability_config::ObservabilityConfig;
pub use privacy_config::{ExtraPattern, PrivacyConfig};
pub use rate_limit_config::{RateLimitConfig, WindowLimit};
pub use scoring_config::ScoringConfig;
pub use storage_config::StorageConfig;
pub use trust_config::TrustConfig;
