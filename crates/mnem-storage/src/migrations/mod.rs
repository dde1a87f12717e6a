mod v001_schema;
mod v002_decay_columns;

use mnem_core::errors::MnemResult;
use rusqlite::Connection;

/// Run every migration in order. Each step is individually idempotent
/// (`CREATE TABLE IF NOT EXISTS`, column-existence checks before `ALTER
/// TABLE`), so running the full sequence twice against the same file is
/// observable-equivalent to running it once (spec §8 property 1).
pub fn run_migrations(conn: &Connection) -> MnemResult<()> {
    v001_schema::migrate(conn)?;
    v002_decay_columns::migrate(conn)?;
    Ok(())
}
