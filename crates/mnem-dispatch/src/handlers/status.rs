use serde_json::{json, Value};

use mnem_core::errors::MnemResult;
use mnem_core::model::Layer;

use crate::context::DispatchContext;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn layer_status_json(ctx: &DispatchContext, layer: Layer) -> Value {
    let status = ctx.coordinator.layer_status(layer);
    let count = ctx
        .coordinator
        .aggregates(layer)
        .map(|a| Value::from(a.count))
        .unwrap_or(Value::Null);
    let path = ctx
        .coordinator
        .layer_path(layer)
        .map(|p| Value::from(p.display().to_string()))
        .unwrap_or(Value::Null);

    json!({
        "status": status,
        "count": count,
        "path": path,
    })
}

/// `get_status`: version, overall health, per-layer connectivity, dual-write
/// configuration, and the decay engine's current configuration and last
/// sweep outcome (spec §6, §11 "Health/status detail").
pub fn get_status(ctx: &DispatchContext) -> MnemResult<Value> {
    let layers: serde_json::Map<String, Value> = Layer::ALL
        .iter()
        .map(|layer| (layer.as_str().to_string(), layer_status_json(ctx, *layer)))
        .collect();

    let decay = ctx.decay.config();
    let last_sweep = ctx.decay.last_sweep().map(|s| {
        json!({
            "sequence": s.sequence,
            "rows_updated": s.rows_updated,
            "duration_ms": s.duration.as_millis() as u64,
        })
    });

    Ok(json!({
        "version": VERSION,
        "health": ctx.coordinator.overall_health(),
        "layers": Value::Object(layers),
        "dual_write": {
            "enabled": ctx.coordinator.dual_write_enabled(),
            "durable_root": ctx.coordinator.durable_root().map(|p| p.display().to_string()),
            "cache_root": ctx.coordinator.cache_root().map(|p| p.display().to_string()),
        },
        "decay_engine": {
            "enabled": decay.enabled,
            "base_rate": decay.base_rate,
            "visibility_threshold": decay.visibility_threshold,
            "immortal_threshold": decay.immortal_threshold,
            "sweep_interval_minutes": decay.sweep_interval_minutes,
            "sweep_batch_size": decay.sweep_batch_size,
            "last_sweep": last_sweep,
        },
    }))
}
