use std::cmp::Ordering;
use std::collections::HashMap;

use mnem_core::errors::MnemResult;
use mnem_core::model::{Layer, Record};
use mnem_core::query::{OrderBy, QueryFilters, QuerySpec};
use serde_json::{json, Value};

use crate::context::DispatchContext;
use mnem_validate::validate_recall;

fn effective_or_importance(record: &Record) -> f64 {
    record.effective_importance.unwrap_or(record.importance)
}

/// `recall`'s ordering is `COALESCE(effective_importance, importance) DESC,
/// timestamp DESC` — a fixed rule distinct from `query_layer`'s whitelisted
/// `order_by` axis (spec §6, §9 open question resolved in favor of the
/// coalesced form).
fn rank(a: &Record, b: &Record) -> Ordering {
    effective_or_importance(b)
        .partial_cmp(&effective_or_importance(a))
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.timestamp.partial_cmp(&a.timestamp).unwrap_or(Ordering::Equal))
}

fn record_to_json(layer: Layer, record: &Record) -> Value {
    json!({
        "layer": layer.as_str(),
        "id": record.id,
        "timestamp": record.timestamp,
        "content": record.content,
        "context": record.context,
        "importance": record.importance,
        "emotional_intensity": record.emotional_intensity,
        "effective_importance": record.effective_importance,
        "metadata": record.metadata.to_value(),
    })
}

/// `recall`: searches one layer when given, every layer otherwise; merges,
/// ranks, truncates, then touches every returned record (spec §4.5 "touch on
/// recall", §6).
pub fn recall(ctx: &DispatchContext, args: &Value) -> MnemResult<Value> {
    let request = validate_recall(args)?;

    let candidate_layers: Vec<Layer> = match request.layer {
        Some(layer) => vec![layer],
        None => Layer::ALL.to_vec(),
    };

    let filters = QueryFilters {
        content_contains: Some(request.query.clone()),
        ..QueryFilters::default()
    };
    let per_layer_spec = QuerySpec {
        filters,
        order_by: OrderBy::FALLBACK,
        limit: request.limit,
        include_decayed: request.include_decayed,
    };

    let mut merged: Vec<(Layer, Record)> = Vec::new();
    for layer in candidate_layers {
        let rows = ctx.coordinator.scan(layer, &per_layer_spec)?;
        merged.extend(rows.into_iter().map(|r| (layer, r)));
    }

    merged.sort_by(|(_, a), (_, b)| rank(a, b));
    merged.truncate(request.limit as usize);

    let mut touched_by_layer: HashMap<Layer, Vec<i64>> = HashMap::new();
    for (layer, record) in &merged {
        touched_by_layer.entry(*layer).or_default().push(record.id);
    }
    for (layer, ids) in touched_by_layer {
        ctx.decay.touch(layer, &ids);
    }

    let data: Vec<Value> = merged.iter().map(|(layer, record)| record_to_json(*layer, record)).collect();
    Ok(Value::Array(data))
}
