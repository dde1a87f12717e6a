use mnem_core::errors::MnemResult;
use mnem_core::model::Record;
use serde_json::{json, Value};

use crate::context::DispatchContext;
use mnem_validate::validate_query_layer;

fn record_to_json(record: &Record) -> Value {
    json!({
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

/// `query_layer`: a single layer scanned through the whitelisted filter +
/// order-by surface, no router involvement, no touch side effect (spec §4.3,
/// §6).
pub fn query_layer(ctx: &DispatchContext, args: &Value) -> MnemResult<Value> {
    let request = validate_query_layer(args)?;
    let rows = ctx.coordinator.scan(request.layer, &request.spec)?;
    let data: Vec<Value> = rows.iter().map(record_to_json).collect();
    Ok(Value::Array(data))
}
