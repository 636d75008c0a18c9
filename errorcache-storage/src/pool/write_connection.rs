//! The one connection that writes. Every mutation queues on its async mutex,
//! so SQLite never sees two writers from this process.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use errorcache_core::errors::ErrorCacheResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct Writer {
    conn: Mutex<Connection>,
}

impl Writer {
    pub fn open(path: &Path, busy_timeout_ms: u64) -> ErrorCacheResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| to_storage_err(format!("open writer {}: {e}", path.display())))?;
        Self::configured(conn, busy_timeout_ms)
    }

    /// A private in-memory database. Nothing else can connect to it.
    pub fn open_in_memory() -> ErrorCacheResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| to_storage_err(format!("open in-memory writer: {e}")))?;
        Self::configured(conn, 0)
    }

    fn configured(conn: Connection, busy_timeout_ms: u64) -> ErrorCacheResult<Self> {
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Wait for the writer, then run `op` on it.
    pub async fn run<F, T>(&self, op: F) -> ErrorCacheResult<T>
    where
        F: FnOnce(&Connection) -> ErrorCacheResult<T>,
    {
        let conn = self.conn.lock().await;
        op(&conn)
    }

    /// Like [`Self::run`], with `op` inside one transaction. Any error rolls
    /// the whole transaction back.
    pub async fn transaction<F>(&self, label: &'static str, op: F) -> ErrorCacheResult<()>
    where
        F: FnOnce(&Connection) -> ErrorCacheResult<()>,
    {
        self.run(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("{label} begin: {e}")))?;
            op(&tx)?;
            tx.commit()
                .map_err(|e| to_storage_err(format!("{label} commit: {e}")))
        })
        .await
    }

    /// Synchronous access for migrations and schema checks. Errors instead of
    /// waiting when the writer is taken, so it never blocks a runtime thread.
    pub fn run_now<F, T>(&self, op: F) -> ErrorCacheResult<T>
    where
        F: FnOnce(&Connection) -> ErrorCacheResult<T>,
    {
        let conn = self
            .conn
            .try_lock()
            .map_err(|_| to_storage_err("writer is busy"))?;
        op(&conn)
    }
}
