//! Schema migrations tracked with `PRAGMA user_version`.

pub mod v001_initial_schema;
pub mod v002_audit_log;

use rusqlite::Connection;
use tracing::info;

use errorcache_core::errors::{ErrorCacheResult, StorageError};

/// Latest schema version.
pub const LATEST_VERSION: u32 = 2;

fn migration_err(version: u32, e: rusqlite::Error) -> StorageError {
    StorageError::MigrationFailed {
        version,
        reason: e.to_string(),
    }
}

/// Apply every migration newer than the database's `user_version`.
/// Each migration and its version bump commit together.
pub fn run_migrations(conn: &Connection) -> ErrorCacheResult<()> {
    let current = current_version(conn)?;

    let migrations: &[(u32, &str)] = &[
        (1, v001_initial_schema::MIGRATION_SQL),
        (2, v002_audit_log::MIGRATION_SQL),
    ];

    for &(version, sql) in migrations {
        if current >= version {
            continue;
        }
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| migration_err(version, e))?;
        tx.execute_batch(sql).map_err(|e| migration_err(version, e))?;
        tx.pragma_update(None, "user_version", version)
            .map_err(|e| migration_err(version, e))?;
        tx.commit().map_err(|e| migration_err(version, e))?;
        info!(version, "applied migration");
    }

    Ok(())
}

pub fn current_version(conn: &Connection) -> ErrorCacheResult<u32> {
    let version = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(version)
}
