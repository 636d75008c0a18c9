//! Error handling for ErrorCache.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod errorcache_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use errorcache_error::{ErrorCacheError, ErrorCacheResult};
pub use storage_error::StorageError;
