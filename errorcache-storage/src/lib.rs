//! # errorcache-storage
//!
//! SQLite implementation of [`IErrorCacheStorage`](errorcache_core::IErrorCacheStorage).
//! One write connection behind an async mutex, read connections in WAL mode
//! that prefer whichever is idle, versioned migrations, and one query module
//! per entity.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use errorcache_core::errors::{ErrorCacheError, StorageError};

/// Wrap a SQLite failure message as a storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> ErrorCacheError {
    ErrorCacheError::StorageError(StorageError::SqliteError {
        message: message.into(),
    })
}
