//! Translates a [`QuerySpec`] into a parameterized SQL scan. No fragment of
//! caller-supplied data is ever concatenated into the statement text — every
//! value flows through a `?` placeholder (spec §4.3, §8 property 10).

use mnem_core::query::QuerySpec;
use rusqlite::types::Value as SqlValue;

/// A compiled scan: the full `SELECT ... FROM records WHERE ... ORDER BY ...
/// LIMIT ...` text, plus its positional parameters in order.
pub struct CompiledScan {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

const SELECT_COLUMNS: &str = "id, timestamp, content, context, importance, \
    emotional_intensity, metadata, last_accessed, effective_importance, access_count";

/// Escape `%`, `_`, and `\` in a user-supplied substring fragment so it can
/// be safely wrapped in `%...%` with an explicit `ESCAPE '\'` clause.
fn escape_like_fragment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '\\' || ch == '%' || ch == '_' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

pub fn compile(query: &QuerySpec, visibility_threshold: f64) -> CompiledScan {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<SqlValue> = Vec::new();

    let f = &query.filters;

    if let Some(id) = f.id {
        clauses.push("id = ?".to_string());
        params.push(SqlValue::Integer(id));
    }
    if let Some(v) = f.importance_min {
        clauses.push("importance >= ?".to_string());
        params.push(SqlValue::Real(v));
    }
    if let Some(v) = f.importance_max {
        clauses.push("importance <= ?".to_string());
        params.push(SqlValue::Real(v));
    }
    if let Some(v) = f.emotional_intensity_min {
        clauses.push("emotional_intensity >= ?".to_string());
        params.push(SqlValue::Real(v));
    }
    if let Some(v) = f.emotional_intensity_max {
        clauses.push("emotional_intensity <= ?".to_string());
        params.push(SqlValue::Real(v));
    }
    if let Some(v) = f.timestamp_after {
        clauses.push("timestamp >= ?".to_string());
        params.push(SqlValue::Real(v));
    }
    if let Some(v) = f.timestamp_before {
        clauses.push("timestamp <= ?".to_string());
        params.push(SqlValue::Real(v));
    }
    if let Some(v) = f.effective_importance_min {
        clauses.push("effective_importance >= ?".to_string());
        params.push(SqlValue::Real(v));
    }
    if let Some(v) = f.effective_importance_max {
        clauses.push("effective_importance <= ?".to_string());
        params.push(SqlValue::Real(v));
    }
    if let Some(ref fragment) = f.content_contains {
        let escaped = format!("%{}%", escape_like_fragment(fragment));
        clauses.push("(event LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\')".to_string());
        params.push(SqlValue::Text(escaped.clone()));
        params.push(SqlValue::Text(escaped));
    }
    if let Some(ref fragment) = f.context_contains {
        let escaped = format!("%{}%", escape_like_fragment(fragment));
        clauses.push("context LIKE ? ESCAPE '\\'".to_string());
        params.push(SqlValue::Text(escaped));
    }

    if !query.include_decayed {
        clauses.push(
            "(effective_importance IS NULL OR effective_importance >= ?)".to_string(),
        );
        params.push(SqlValue::Real(visibility_threshold));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let order_clause = format!(
        " ORDER BY {} {}",
        query.order_by.column.column_name(),
        query.order_by.direction.sql_keyword()
    );

    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM records{where_clause}{order_clause} LIMIT ?"
    );
    params.push(SqlValue::Integer(query.limit as i64));

    CompiledScan { sql, params }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnem_core::query::{OrderBy, QueryFilters};

    fn spec(filters: QueryFilters) -> QuerySpec {
        QuerySpec {
            filters,
            order_by: OrderBy::FALLBACK,
            limit: 10,
            include_decayed: false,
        }
    }

    #[test]
    fn escapes_percent_and_underscore() {
        let escaped = escape_like_fragment("100%_off\\sale");
        assert_eq!(escaped, "100\\%\\_off\\\\sale");
    }

    #[test]
    fn content_filter_never_embeds_raw_fragment_in_sql_text() {
        let mut filters = QueryFilters::default();
        filters.content_contains = Some("'; DROP TABLE records; --".to_string());
        let compiled = compile(&spec(filters), 0.1);
        assert!(!compiled.sql.contains("DROP TABLE"));
        assert!(compiled.sql.contains("LIKE ? ESCAPE"));
    }

    #[test]
    fn omits_decay_filter_when_include_decayed() {
        let mut q = spec(QueryFilters::default());
        q.include_decayed = true;
        let compiled = compile(&q, 0.1);
        assert!(!compiled.sql.contains("effective_importance IS NULL OR"));
    }

    #[test]
    fn default_visibility_filter_present() {
        let compiled = compile(&spec(QueryFilters::default()), 0.1);
        assert!(compiled.sql.contains("effective_importance IS NULL OR effective_importance >= ?"));
    }
}
