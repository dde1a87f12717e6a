use mnem_core::errors::MnemResult;
use mnem_core::model::Record;
use mnem_core::query::QuerySpec;
use mnem_core::traits::{LayerAggregates, RecordUpdate};
use rusqlite::{params, Connection, Row};

use super::compiler::{compile, CompiledScan};
use crate::to_storage_err;

pub fn insert_record(conn: &Connection, record: &Record) -> MnemResult<i64> {
    let metadata_json =
        serde_json::to_string(&record.metadata).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO records (
            timestamp, content, event, context, importance, emotional_intensity,
            metadata, last_accessed, effective_importance, access_count
        ) VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.timestamp,
            record.content,
            record.context,
            record.importance,
            record.emotional_intensity,
            metadata_json,
            record.last_accessed,
            record.effective_importance,
            record.access_count,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(conn.last_insert_rowid())
}

pub fn scan_records(
    conn: &Connection,
    query: &QuerySpec,
    visibility_threshold: f64,
) -> MnemResult<Vec<Record>> {
    let CompiledScan { sql, params } = compile(query, visibility_threshold);
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(params.iter()), row_to_record)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(out)
}

/// Rows with `importance < immortal_threshold AND last_accessed IS NOT NULL`,
/// up to `limit`, ordered by id for deterministic batching across ticks.
pub fn sweep_candidates(
    conn: &Connection,
    immortal_threshold: f64,
    limit: u32,
) -> MnemResult<Vec<Record>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, timestamp, content, context, importance, emotional_intensity, \
             metadata, last_accessed, effective_importance, access_count \
             FROM records \
             WHERE importance < ?1 AND last_accessed IS NOT NULL \
             ORDER BY id ASC LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![immortal_threshold, limit], row_to_record)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(out)
}

/// Apply a batch of per-id partial updates inside one transaction, preserving
/// the order the caller supplied (spec §4.2 "ordering within a single target
/// is preserved"). Uses an unchecked transaction rather than
/// `Connection::transaction` because the writer is shared behind a mutex as
/// `&Connection`, never `&mut`; the mutex already serializes access.
pub fn update_batch(conn: &Connection, updates: &[RecordUpdate]) -> MnemResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("update_batch begin: {e}")))?;
    let mut applied = 0usize;

    for update in updates {
        let mut sets = Vec::new();
        let mut values: Vec<rusqlite::types::Value> = Vec::new();

        if let Some(e) = update.effective_importance {
            sets.push("effective_importance = ?".to_string());
            values.push(rusqlite::types::Value::Real(e));
        }
        if let Some(t) = update.last_accessed {
            sets.push("last_accessed = ?".to_string());
            values.push(rusqlite::types::Value::Real(t));
        }
        if let Some(delta) = update.access_count_delta {
            sets.push("access_count = access_count + ?".to_string());
            values.push(rusqlite::types::Value::Integer(delta));
        }
        if sets.is_empty() {
            continue;
        }
        values.push(rusqlite::types::Value::Integer(update.id));

        let sql = format!("UPDATE records SET {} WHERE id = ?", sets.join(", "));
        let n = tx
            .execute(&sql, rusqlite::params_from_iter(values.iter()))
            .map_err(|e| to_storage_err(e.to_string()))?;
        applied += n;
    }

    tx.commit()
        .map_err(|e| to_storage_err(format!("update_batch commit: {e}")))?;
    Ok(applied)
}

pub fn aggregates(
    conn: &Connection,
    immortal_threshold: f64,
    visibility_threshold: f64,
) -> MnemResult<LayerAggregates> {
    let mut stmt = conn
        .prepare(
            "SELECT \
                COUNT(*), \
                COALESCE(AVG(importance), 0.0), \
                COALESCE(AVG(emotional_intensity), 0.0), \
                MAX(timestamp), \
                SUM(CASE WHEN importance >= ?1 THEN 1 ELSE 0 END), \
                SUM(CASE WHEN importance < ?1 AND (effective_importance IS NULL OR effective_importance >= ?2) THEN 1 ELSE 0 END), \
                SUM(CASE WHEN importance < ?1 AND effective_importance IS NOT NULL AND effective_importance < ?2 THEN 1 ELSE 0 END) \
             FROM records",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![immortal_threshold, visibility_threshold], |row| {
            Ok(LayerAggregates {
                count: row.get(0)?,
                avg_importance: row.get(1)?,
                avg_emotional_intensity: row.get(2)?,
                max_timestamp: row.get(3)?,
                immortal_count: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
                active_count: row.get::<_, Option<i64>>(5)?.unwrap_or(0),
                decayed_count: row.get::<_, Option<i64>>(6)?.unwrap_or(0),
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(result)
}

fn row_to_record(row: &Row) -> rusqlite::Result<Record> {
    let metadata_json: String = row.get(6)?;
    let metadata_value: serde_json::Value =
        serde_json::from_str(&metadata_json).unwrap_or(serde_json::Value::Null);
    let metadata = mnem_core::model::Metadata::from_value(&metadata_value);

    Ok(Record {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        content: row.get(2)?,
        context: row.get(3)?,
        importance: row.get(4)?,
        emotional_intensity: row.get(5)?,
        metadata,
        last_accessed: row.get(7)?,
        effective_importance: row.get(8)?,
        access_count: row.get(9)?,
    })
}
