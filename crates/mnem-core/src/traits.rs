use crate::errors::MnemResult;
use crate::model::Record;
use crate::query::QuerySpec;

/// Per-file CRUD + aggregate contract for one layer's backing store (spec
/// §4.1). Implemented by `mnem-storage`'s `LayerStore`; consumed by the
/// coordinator, which owns one pair of handles (primary, optional secondary)
/// per layer.
pub trait LayerStoreHandle: Send + Sync {
    /// Insert a record, returning the store-assigned id.
    fn insert(&self, record: &Record) -> MnemResult<i64>;

    /// Run a compiled scan, returning matching records.
    fn scan(&self, query: &QuerySpec) -> MnemResult<Vec<Record>>;

    /// Apply an update-by-id batch (used by the decay sweep and by touch).
    fn update_batch(&self, updates: &[RecordUpdate]) -> MnemResult<usize>;

    /// Select up to `limit` rows eligible for a decay sweep pass.
    fn sweep_candidates(&self, immortal_threshold: f64, limit: u32) -> MnemResult<Vec<Record>>;

    fn aggregates(&self) -> MnemResult<LayerAggregates>;
}

/// A partial update applied to one row by id. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub id: i64,
    pub effective_importance: Option<f64>,
    pub last_accessed: Option<f64>,
    pub access_count_delta: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LayerAggregates {
    pub count: i64,
    pub avg_importance: f64,
    pub avg_emotional_intensity: f64,
    pub max_timestamp: Option<f64>,
    pub immortal_count: i64,
    pub active_count: i64,
    pub decayed_count: i64,
}
