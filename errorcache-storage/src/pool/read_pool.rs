//! Read-only connections to a file-backed cache.
//!
//! WAL lets these run beside the writer. A read takes the first idle
//! connection it finds, starting from a rotating cursor, and only waits when
//! every connection is busy.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use rusqlite::{Connection, OpenFlags};

use errorcache_core::errors::ErrorCacheResult;

use super::pragmas::apply_read_pragmas;
use crate::to_storage_err;

/// Upper bound on reader connections, whatever the configuration asks for.
const READER_CAP: usize = 8;

pub struct ReadPool {
    readers: Box<[Mutex<Connection>]>,
    cursor: AtomicUsize,
}

impl ReadPool {
    pub fn open(path: &Path, requested: usize, busy_timeout_ms: u64) -> ErrorCacheResult<Self> {
        let readers = (0..requested.clamp(1, READER_CAP))
            .map(|_| open_reader(path, busy_timeout_ms).map(Mutex::new))
            .collect::<ErrorCacheResult<Vec<_>>>()?;
        Ok(Self {
            readers: readers.into_boxed_slice(),
            cursor: AtomicUsize::new(0),
        })
    }

    /// Run `read` on an idle connection, or wait for the cursor's one.
    pub fn read<F, T>(&self, read: F) -> ErrorCacheResult<T>
    where
        F: FnOnce(&Connection) -> ErrorCacheResult<T>,
    {
        let conn = self.checkout();
        read(&conn)
    }

    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    fn checkout(&self) -> MutexGuard<'_, Connection> {
        let start = self.cursor.fetch_add(1, Ordering::Relaxed);
        let count = self.readers.len();
        for offset in 0..count {
            match self.readers[(start + offset) % count].try_lock() {
                Ok(guard) => return guard,
                // A panicked read leaves the connection itself usable.
                Err(TryLockError::Poisoned(poisoned)) => return poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => {}
            }
        }
        self.readers[start % count]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn open_reader(path: &Path, busy_timeout_ms: u64) -> ErrorCacheResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)
        .map_err(|e| to_storage_err(format!("open reader {}: {e}", path.display())))?;
    apply_read_pragmas(&conn, busy_timeout_ms)?;
    Ok(conn)
}
