use mnem_core::errors::MnemResult;
use mnem_core::model::{now_seconds, Layer, Metadata, Record};
use serde_json::{json, Value};

use crate::context::{DispatchContext, DEFAULT_EMOTIONAL_INTENSITY, DEFAULT_IMPORTANCE};
use mnem_validate::{validate_remember, validate_save_to_layer};

fn record_from_metadata(content: String, context: String, metadata: Metadata, immortal_threshold: f64) -> Record {
    let importance = metadata.importance.unwrap_or(DEFAULT_IMPORTANCE);
    let emotional_intensity = metadata.emotional_intensity.unwrap_or(DEFAULT_EMOTIONAL_INTENSITY);
    Record::new(
        now_seconds(),
        content,
        context,
        importance,
        emotional_intensity,
        metadata,
        immortal_threshold,
    )
}

fn insert_and_render(ctx: &DispatchContext, layer: Layer, record: &Record) -> MnemResult<Value> {
    let (id, wrote_to_cache) = ctx.coordinator.insert(layer, record)?;
    Ok(json!({
        "layer": layer.as_str(),
        "id": id,
        "timestamp": record.timestamp,
        "dual_write": wrote_to_cache,
    }))
}

/// `remember`: routes through the content router when no explicit layer is
/// given (spec §2 write flow, §6).
pub fn remember(ctx: &DispatchContext, args: &Value) -> MnemResult<Value> {
    let request = validate_remember(args)?;
    let immortal_threshold = ctx.decay.config().immortal_threshold;

    let layer = match request.layer {
        Some(layer) => layer,
        None => mnem_router::analyze(&request.content).layer,
    };

    let record = record_from_metadata(request.content, request.context, request.metadata, immortal_threshold);
    insert_and_render(ctx, layer, &record)
}

/// `save_to_layer`: layer is always explicit, bypassing the router (spec
/// §4.4, §6).
pub fn save_to_layer(ctx: &DispatchContext, args: &Value) -> MnemResult<Value> {
    let request = validate_save_to_layer(args)?;
    let immortal_threshold = ctx.decay.config().immortal_threshold;

    let record = record_from_metadata(request.content, request.context, request.metadata, immortal_threshold);
    insert_and_render(ctx, request.layer, &record)
}
