use serde_json::{json, Value};

use mnem_core::errors::MnemResult;
use mnem_core::model::Layer;
use mnem_core::traits::LayerAggregates;

use crate::context::DispatchContext;

fn layer_stats_json(aggregates: &LayerAggregates) -> Value {
    json!({
        "count": aggregates.count,
        "avg_importance": aggregates.avg_importance,
        "avg_emotional_intensity": aggregates.avg_emotional_intensity,
        "most_recent": aggregates.max_timestamp,
        "immortal_count": aggregates.immortal_count,
        "active_count": aggregates.active_count,
        "decayed_count": aggregates.decayed_count,
    })
}

/// `get_stats`: per-layer aggregate counts and a decay-config echo (spec
/// §6).
pub fn get_stats(ctx: &DispatchContext) -> MnemResult<Value> {
    let mut layers = serde_json::Map::new();
    for layer in Layer::ALL {
        let aggregates = ctx.coordinator.aggregates(layer)?;
        layers.insert(layer.as_str().to_string(), layer_stats_json(&aggregates));
    }

    let decay = ctx.decay.config();
    Ok(json!({
        "layers": Value::Object(layers),
        "decay_config": {
            "enabled": decay.enabled,
            "base_rate": decay.base_rate,
            "visibility_threshold": decay.visibility_threshold,
            "immortal_threshold": decay.immortal_threshold,
            "sweep_interval_minutes": decay.sweep_interval_minutes,
            "sweep_batch_size": decay.sweep_batch_size,
        },
    }))
}
