//! v001: base record schema, shared identically across all six layer files.

use mnem_core::errors::MnemResult;
use rusqlite::Connection;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MnemResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS records (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp           REAL NOT NULL,
            content             TEXT NOT NULL,
            event               TEXT NOT NULL,
            context             TEXT NOT NULL DEFAULT '',
            importance          REAL NOT NULL DEFAULT 0.7,
            emotional_intensity REAL NOT NULL DEFAULT 0.5,
            metadata            TEXT NOT NULL DEFAULT '{}'
        );

        CREATE INDEX IF NOT EXISTS idx_records_timestamp ON records(timestamp);
        CREATE INDEX IF NOT EXISTS idx_records_importance ON records(importance);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
