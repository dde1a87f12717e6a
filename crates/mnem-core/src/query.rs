use serde::{Deserialize, Serialize};

/// The recognized filter keys the Query Compiler accepts (spec §4.3).
/// Parsing raw JSON into this shape is the validator's job; this struct is
/// the typed contract shared between the validator, the dispatcher, and the
/// storage crate's compiler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryFilters {
    pub id: Option<i64>,
    pub importance_min: Option<f64>,
    pub importance_max: Option<f64>,
    pub emotional_intensity_min: Option<f64>,
    pub emotional_intensity_max: Option<f64>,
    pub timestamp_after: Option<f64>,
    pub timestamp_before: Option<f64>,
    pub content_contains: Option<String>,
    pub context_contains: Option<String>,
    pub effective_importance_min: Option<f64>,
    pub effective_importance_max: Option<f64>,
}

/// The whitelisted scan columns (spec §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderColumn {
    Id,
    Timestamp,
    Content,
    Event,
    Context,
    EmotionalIntensity,
    Importance,
}

impl OrderColumn {
    pub fn column_name(self) -> &'static str {
        match self {
            OrderColumn::Id => "id",
            OrderColumn::Timestamp => "timestamp",
            OrderColumn::Content => "content",
            OrderColumn::Event => "event",
            OrderColumn::Context => "context",
            OrderColumn::EmotionalIntensity => "emotional_intensity",
            OrderColumn::Importance => "importance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    Ascending,
    Descending,
}

impl OrderDirection {
    pub fn sql_keyword(self) -> &'static str {
        match self {
            OrderDirection::Ascending => "ASC",
            OrderDirection::Descending => "DESC",
        }
    }
}

/// A validated ordering clause. Any unparsable `order_by` string collapses
/// to the fallback (spec §4.3, §8 property 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: OrderColumn,
    pub direction: OrderDirection,
}

impl OrderBy {
    pub const FALLBACK: OrderBy = OrderBy {
        column: OrderColumn::Timestamp,
        direction: OrderDirection::Descending,
    };

    /// Parse a caller-supplied `order_by` string of the shape `"<column>
    /// <asc|desc>"` (or bare `"<column>"`, defaulting to descending). Any
    /// deviation from the whitelist falls back to `timestamp DESC`.
    pub fn parse(raw: &str) -> OrderBy {
        let mut parts = raw.trim().split_whitespace();
        let column = match parts.next().map(str::to_lowercase) {
            Some(ref s) if s == "id" => OrderColumn::Id,
            Some(ref s) if s == "timestamp" => OrderColumn::Timestamp,
            Some(ref s) if s == "content" => OrderColumn::Content,
            Some(ref s) if s == "event" => OrderColumn::Event,
            Some(ref s) if s == "context" => OrderColumn::Context,
            Some(ref s) if s == "emotional_intensity" => OrderColumn::EmotionalIntensity,
            Some(ref s) if s == "importance" => OrderColumn::Importance,
            _ => return OrderBy::FALLBACK,
        };
        let direction = match parts.next().map(str::to_lowercase) {
            None => OrderDirection::Descending,
            Some(ref s) if s == "asc" || s == "ascending" => OrderDirection::Ascending,
            Some(ref s) if s == "desc" || s == "descending" => OrderDirection::Descending,
            _ => return OrderBy::FALLBACK,
        };
        if parts.next().is_some() {
            return OrderBy::FALLBACK;
        }
        OrderBy { column, direction }
    }
}

/// A fully validated query, ready for the storage crate to compile to SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    pub filters: QueryFilters,
    pub order_by: OrderBy,
    pub limit: u32,
    pub include_decayed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_column_falls_back() {
        assert_eq!(OrderBy::parse("sql_injection desc"), OrderBy::FALLBACK);
    }

    #[test]
    fn unknown_direction_falls_back() {
        assert_eq!(OrderBy::parse("importance sideways"), OrderBy::FALLBACK);
    }

    #[test]
    fn bare_column_defaults_to_descending() {
        assert_eq!(
            OrderBy::parse("importance"),
            OrderBy {
                column: OrderColumn::Importance,
                direction: OrderDirection::Descending,
            }
        );
    }

    #[test]
    fn trailing_garbage_falls_back() {
        assert_eq!(OrderBy::parse("importance desc extra"), OrderBy::FALLBACK);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(
            OrderBy::parse("TIMESTAMP ASC"),
            OrderBy {
                column: OrderColumn::Timestamp,
                direction: OrderDirection::Ascending,
            }
        );
    }
}
