use mnem_core::errors::ValidationError;
use mnem_core::model::{Layer, Metadata};
use mnem_core::query::{OrderBy, QueryFilters, QuerySpec};
use serde_json::Value;

use crate::fields;
use crate::metadata::validate_metadata;

fn str_field<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

fn f64_field(args: &Value, key: &str) -> Option<f64> {
    args.get(key).and_then(Value::as_f64)
}

fn bool_field(args: &Value, key: &str) -> bool {
    args.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn require_str(args: &Value, key: &str) -> Result<String, ValidationError> {
    str_field(args, key)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::field(key, "is required"))
}

fn optional_layer(args: &Value, key: &str) -> Result<Option<Layer>, ValidationError> {
    match str_field(args, key) {
        None => Ok(None),
        Some(name) => Layer::resolve(name).map(Some),
    }
}

fn metadata_field(args: &Value) -> Result<Metadata, ValidationError> {
    match args.get("metadata") {
        None => Ok(Metadata::default()),
        Some(raw) => validate_metadata(raw),
    }
}

/// A validated `remember` request: layer is `None` when the caller left
/// routing to the content router (spec §6 contract table, §2 write flow).
#[derive(Debug, Clone)]
pub struct RememberRequest {
    pub content: String,
    pub context: String,
    pub layer: Option<Layer>,
    pub metadata: Metadata,
}

pub fn validate_remember(args: &Value) -> Result<RememberRequest, ValidationError> {
    let content = fields::validate_content(&require_str(args, "content")?)?;
    let context = match str_field(args, "context") {
        Some(raw) => fields::validate_context(raw)?,
        None => String::new(),
    };
    let layer = optional_layer(args, "layer")?;
    let metadata = metadata_field(args)?;
    Ok(RememberRequest {
        content,
        context,
        layer,
        metadata,
    })
}

/// A validated `save_to_layer` request: layer is mandatory and always
/// explicit, bypassing the content router (spec §4.4, §6).
#[derive(Debug, Clone)]
pub struct SaveToLayerRequest {
    pub layer: Layer,
    pub content: String,
    pub context: String,
    pub metadata: Metadata,
}

pub fn validate_save_to_layer(args: &Value) -> Result<SaveToLayerRequest, ValidationError> {
    let layer = Layer::resolve(&require_str(args, "layer")?)?;
    let content = fields::validate_content(&require_str(args, "content")?)?;
    let context = match str_field(args, "context") {
        Some(raw) => fields::validate_context(raw)?,
        None => String::new(),
    };
    let metadata = metadata_field(args)?;
    Ok(SaveToLayerRequest {
        layer,
        content,
        context,
        metadata,
    })
}

/// A validated `recall` request. `layer` restricts the search to one layer
/// when present; when absent the dispatcher searches every layer (spec §6).
#[derive(Debug, Clone)]
pub struct RecallRequest {
    pub query: String,
    pub layer: Option<Layer>,
    pub limit: u32,
    pub include_decayed: bool,
}

pub fn validate_recall(args: &Value) -> Result<RecallRequest, ValidationError> {
    let query = fields::validate_query(&require_str(args, "query")?)?;
    let layer = optional_layer(args, "layer")?;
    let limit = fields::validate_limit(args.get("limit").and_then(Value::as_u64).map(|v| v as u32))?;
    let include_decayed = bool_field(args, "include_decayed");
    Ok(RecallRequest {
        query,
        layer,
        limit,
        include_decayed,
    })
}

/// A validated `query_layer` request: a single mandatory layer plus a
/// compiled `QuerySpec` ready for the storage crate (spec §4.3, §6).
#[derive(Debug, Clone)]
pub struct QueryLayerRequest {
    pub layer: Layer,
    pub spec: QuerySpec,
}

pub fn validate_query_layer(args: &Value) -> Result<QueryLayerRequest, ValidationError> {
    let layer = Layer::resolve(&require_str(args, "layer")?)?;
    let options = args.get("options").cloned().unwrap_or(Value::Null);
    let filters_raw = options.get("filters").cloned().unwrap_or(Value::Null);

    let filters = validate_filters(&filters_raw)?;

    let order_by = match options.get("order_by").and_then(Value::as_str) {
        Some(raw) => OrderBy::parse(raw),
        None => OrderBy::FALLBACK,
    };

    let limit = fields::validate_limit(options.get("limit").and_then(Value::as_u64).map(|v| v as u32))?;
    let include_decayed = bool_field(args, "include_decayed");

    Ok(QueryLayerRequest {
        layer,
        spec: QuerySpec {
            filters,
            order_by,
            limit,
            include_decayed,
        },
    })
}

fn validate_filters(raw: &Value) -> Result<QueryFilters, ValidationError> {
    let mut filters = QueryFilters::default();
    if raw.is_null() {
        return Ok(filters);
    }

    filters.id = raw.get("id").and_then(Value::as_i64);

    filters.importance_min = check_unit(raw, "importance_min")?;
    filters.importance_max = check_unit(raw, "importance_max")?;
    fields::validate_range_order("importance", filters.importance_min, filters.importance_max)?;

    filters.emotional_intensity_min = check_unit(raw, "emotional_intensity_min")?;
    filters.emotional_intensity_max = check_unit(raw, "emotional_intensity_max")?;
    fields::validate_range_order(
        "emotional_intensity",
        filters.emotional_intensity_min,
        filters.emotional_intensity_max,
    )?;

    filters.effective_importance_min = check_unit(raw, "effective_importance_min")?;
    filters.effective_importance_max = check_unit(raw, "effective_importance_max")?;
    fields::validate_range_order(
        "effective_importance",
        filters.effective_importance_min,
        filters.effective_importance_max,
    )?;

    filters.timestamp_after = check_timestamp(raw, "timestamp_after")?;
    filters.timestamp_before = check_timestamp(raw, "timestamp_before")?;
    fields::validate_range_order("timestamp", filters.timestamp_after, filters.timestamp_before)?;

    if let Some(raw_str) = str_field(raw, "content_contains") {
        filters.content_contains = Some(fields::validate_query(raw_str)?);
    }
    if let Some(raw_str) = str_field(raw, "context_contains") {
        filters.context_contains = Some(fields::validate_context(raw_str)?);
    }

    Ok(filters)
}

fn check_unit(raw: &Value, key: &str) -> Result<Option<f64>, ValidationError> {
    match f64_field(raw, key) {
        None => Ok(None),
        Some(v) => fields::validate_unit_range(key, v).map(Some),
    }
}

fn check_timestamp(raw: &Value, key: &str) -> Result<Option<f64>, ValidationError> {
    match f64_field(raw, key) {
        None => Ok(None),
        Some(v) => fields::validate_timestamp(key, v).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remember_defaults_layer_to_none_for_router() {
        let req = validate_remember(&json!({ "content": "hello world" })).unwrap();
        assert!(req.layer.is_none());
        assert_eq!(req.content, "hello world");
    }

    #[test]
    fn remember_resolves_explicit_layer_alias() {
        let req = validate_remember(&json!({ "content": "hi", "layer": "core" })).unwrap();
        assert_eq!(req.layer, Some(Layer::Identity));
    }

    #[test]
    fn remember_rejects_missing_content() {
        assert!(validate_remember(&json!({})).is_err());
    }

    #[test]
    fn save_to_layer_requires_layer() {
        assert!(validate_save_to_layer(&json!({ "content": "hi" })).is_err());
    }

    #[test]
    fn save_to_layer_rejects_unknown_layer_name() {
        assert!(validate_save_to_layer(&json!({ "layer": "nonsense", "content": "hi" })).is_err());
    }

    #[test]
    fn recall_defaults_limit_and_include_decayed() {
        let req = validate_recall(&json!({ "query": "hello" })).unwrap();
        assert_eq!(req.limit, 10);
        assert!(!req.include_decayed);
        assert!(req.layer.is_none());
    }

    #[test]
    fn query_layer_falls_back_order_by_on_garbage() {
        let req = validate_query_layer(&json!({
            "layer": "semantic",
            "options": { "order_by": "drop table records" }
        }))
        .unwrap();
        assert_eq!(req.spec.order_by, OrderBy::FALLBACK);
    }

    #[test]
    fn query_layer_rejects_inverted_importance_range() {
        let result = validate_query_layer(&json!({
            "layer": "semantic",
            "options": { "filters": { "importance_min": 0.9, "importance_max": 0.1 } }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn query_layer_passes_through_safe_substring_filter() {
        let req = validate_query_layer(&json!({
            "layer": "episodic",
            "options": { "filters": { "content_contains": "100%" } }
        }))
        .unwrap();
        assert_eq!(req.spec.filters.content_contains.as_deref(), Some("100%"));
    }
}
