use mnem_core::model::Layer;
use mnem_core::traits::RecordUpdate;
use mnem_coordinator::Coordinator;

/// Refresh `last_accessed` and increment `access_count` for every id a
/// recall returned. Fire-and-forget from the caller's perspective: failures
/// are logged, never propagated (spec §4.5 "Touch").
pub fn touch(coordinator: &Coordinator, layer: Layer, ids: &[i64], now: f64) {
    if ids.is_empty() {
        return;
    }
    let updates: Vec<RecordUpdate> = ids
        .iter()
        .map(|&id| RecordUpdate {
            id,
            effective_importance: None,
            last_accessed: Some(now),
            access_count_delta: Some(1),
        })
        .collect();

    if let Err(e) = coordinator.update_batch(layer, &updates) {
        tracing::warn!(layer = %layer, error = %e, "touch update failed, recall result still returned");
    }
}
