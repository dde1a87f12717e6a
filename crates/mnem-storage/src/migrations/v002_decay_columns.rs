//! v002: additive decay columns. Idempotent — safe to run against a fresh
//! v001 schema or a pre-existing `records` table from an older deployment.
//! Back-fills `last_accessed ← timestamp`, `effective_importance ← importance`,
//! `access_count ← 0` for every row that predates this migration (spec §4.1).

use mnem_core::errors::MnemResult;
use rusqlite::Connection;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> MnemResult<()> {
    add_column_if_missing(conn, "last_accessed", "REAL")?;
    add_column_if_missing(conn, "effective_importance", "REAL")?;
    add_column_if_missing(conn, "access_count", "INTEGER NOT NULL DEFAULT 0")?;

    conn.execute(
        "UPDATE records SET last_accessed = timestamp WHERE last_accessed IS NULL",
        [],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "UPDATE records SET effective_importance = importance WHERE effective_importance IS NULL",
        [],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(())
}

fn add_column_if_missing(conn: &Connection, column: &str, ddl_type: &str) -> MnemResult<()> {
    if column_exists(conn, column)? {
        return Ok(());
    }
    let sql = format!("ALTER TABLE records ADD COLUMN {column} {ddl_type}");
    conn.execute(&sql, []).map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

fn column_exists(conn: &Connection, column: &str) -> MnemResult<bool> {
    let mut stmt = conn
        .prepare("SELECT 1 FROM pragma_table_info('records') WHERE name = ?1")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let exists = stmt
        .exists([column])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(exists)
}
