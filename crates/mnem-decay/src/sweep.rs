use mnem_core::errors::MnemResult;
use mnem_core::model::Layer;
use mnem_core::traits::RecordUpdate;
use mnem_coordinator::Coordinator;

use crate::formula::effective_importance;

/// Outcome of one sweep tick across every layer (spec §11 supplemented
/// feature).
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepStats {
    pub sequence: u64,
    pub rows_updated: u64,
    pub duration: std::time::Duration,
}

/// Sweep a single layer: select up to `limit` eligible rows, recompute
/// effective importance for each, and apply the update batch through the
/// coordinator. Errors for this layer are logged and do not abort the
/// overall sweep (spec §7 "Decay sweep errors are logged per layer").
pub fn sweep_layer(
    coordinator: &Coordinator,
    layer: Layer,
    now: f64,
    base_rate: f64,
    immortal_threshold: f64,
    batch_size: u32,
) -> MnemResult<u64> {
    let candidates = coordinator.sweep_candidates(layer, immortal_threshold, batch_size)?;
    if candidates.is_empty() {
        return Ok(0);
    }

    let updates: Vec<RecordUpdate> = candidates
        .iter()
        .map(|record| {
            let e = effective_importance(
                record.importance,
                record.last_accessed,
                now,
                base_rate,
                immortal_threshold,
            );
            RecordUpdate {
                id: record.id,
                effective_importance: Some(e),
                last_accessed: None,
                access_count_delta: None,
            }
        })
        .collect();

    let applied = coordinator.update_batch(layer, &updates)?;
    Ok(applied as u64)
}

/// Run one sweep tick across all six layers. Per-layer errors are logged
/// and the sweep continues on the remaining layers.
pub fn sweep_all(
    coordinator: &Coordinator,
    now: f64,
    base_rate: f64,
    immortal_threshold: f64,
    batch_size: u32,
    sequence: u64,
) -> SweepStats {
    let started = std::time::Instant::now();
    let mut rows_updated = 0u64;

    for layer in Layer::ALL {
        match sweep_layer(coordinator, layer, now, base_rate, immortal_threshold, batch_size) {
            Ok(n) => rows_updated += n,
            Err(e) => tracing::error!(layer = %layer, sequence, error = %e, "decay sweep failed for layer"),
        }
    }

    SweepStats {
        sequence,
        rows_updated,
        duration: started.elapsed(),
    }
}
