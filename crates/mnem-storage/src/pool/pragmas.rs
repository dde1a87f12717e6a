//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, 256MB mmap, 64MB cache, 5s busy_timeout,
//! foreign_keys ON, incremental auto_vacuum.

use mnem_core::errors::MnemResult;
use rusqlite::Connection;

use crate::to_storage_err;

/// Apply all performance and safety pragmas to a writer connection.
pub fn apply_write_pragmas(conn: &Connection) -> MnemResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA mmap_size = 268435456;
        PRAGMA cache_size = -64000;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        PRAGMA auto_vacuum = INCREMENTAL;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Pragmas appropriate for a read-only connection in the round-robin pool.
pub fn apply_read_pragmas(conn: &Connection) -> MnemResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA cache_size = -32000;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
