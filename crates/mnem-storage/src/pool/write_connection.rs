use std::path::Path;
use std::sync::Mutex;

use mnem_core::errors::MnemResult;
use rusqlite::Connection;

use super::pragmas::apply_write_pragmas;
use crate::to_storage_err;

/// The single writer connection for one layer file. Every mutation — insert,
/// update, migration — goes through this handle, serialized by the mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> MnemResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_write_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> MnemResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_write_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure against the writer connection. Named `_sync` to mirror
    /// the fact this blocks the calling task for the duration of the call —
    /// there is no async sqlite driver in this stack.
    pub fn with_conn_sync<F, T>(&self, f: F) -> MnemResult<T>
    where
        F: FnOnce(&Connection) -> MnemResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("writer lock poisoned: {e}")))?;
        f(&guard)
    }
}
