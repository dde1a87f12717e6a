use mnem_core::model::{Metadata, Record};
use mnem_core::query::{OrderBy, QueryFilters, QuerySpec};
use mnem_core::traits::{LayerStoreHandle, RecordUpdate};
use mnem_storage::LayerStore;

fn sample_record(timestamp: f64, content: &str, importance: f64) -> Record {
    Record::new(
        timestamp,
        content.to_string(),
        String::new(),
        importance,
        0.5,
        Metadata::default(),
        0.9,
    )
}

#[test]
fn opening_twice_preserves_rows_and_backfilled_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("episodic_memory.db");

    let store = LayerStore::open(&path, 0.1, 0.9).unwrap();
    let id = store.insert(&sample_record(1000.0, "first visit", 0.6)).unwrap();
    drop(store);

    // Reopen: migrations must be idempotent and the row must survive.
    let store = LayerStore::open(&path, 0.1, 0.9).unwrap();
    let scan = store
        .scan(&QuerySpec {
            filters: QueryFilters::default(),
            order_by: OrderBy::FALLBACK,
            limit: 10,
            include_decayed: true,
        })
        .unwrap();

    assert_eq!(scan.len(), 1);
    assert_eq!(scan[0].id, id);
    assert_eq!(scan[0].last_accessed, Some(1000.0));
    assert_eq!(scan[0].access_count, 0);
}

#[test]
fn insert_then_scan_round_trips_fields() {
    let store = LayerStore::open_in_memory(0.1, 0.9).unwrap();
    let record = sample_record(500.0, "deployment process notes", 0.8);
    let id = store.insert(&record).unwrap();

    let scan = store
        .scan(&QuerySpec {
            filters: QueryFilters::default(),
            order_by: OrderBy::FALLBACK,
            limit: 10,
            include_decayed: true,
        })
        .unwrap();

    assert_eq!(scan.len(), 1);
    let fetched = &scan[0];
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.content, "deployment process notes");
    assert_eq!(fetched.importance, 0.8);
}

#[test]
fn update_batch_applies_effective_importance_and_touch() {
    let store = LayerStore::open_in_memory(0.1, 0.9).unwrap();
    let id = store.insert(&sample_record(0.0, "old memory", 0.5)).unwrap();

    let applied = store
        .update_batch(&[RecordUpdate {
            id,
            effective_importance: Some(0.42),
            last_accessed: Some(12345.0),
            access_count_delta: Some(1),
        }])
        .unwrap();
    assert_eq!(applied, 1);

    let scan = store
        .scan(&QuerySpec {
            filters: QueryFilters::default(),
            order_by: OrderBy::FALLBACK,
            limit: 10,
            include_decayed: true,
        })
        .unwrap();
    assert_eq!(scan[0].effective_importance, Some(0.42));
    assert_eq!(scan[0].last_accessed, Some(12345.0));
    assert_eq!(scan[0].access_count, 1);
}

#[test]
fn default_visibility_filter_hides_decayed_rows() {
    let store = LayerStore::open_in_memory(0.1, 0.9).unwrap();
    let id = store.insert(&sample_record(0.0, "decayed", 0.3)).unwrap();
    store
        .update_batch(&[RecordUpdate {
            id,
            effective_importance: Some(0.05),
            last_accessed: None,
            access_count_delta: None,
        }])
        .unwrap();

    let visible = store
        .scan(&QuerySpec {
            filters: QueryFilters::default(),
            order_by: OrderBy::FALLBACK,
            limit: 10,
            include_decayed: false,
        })
        .unwrap();
    assert!(visible.is_empty());

    let all = store
        .scan(&QuerySpec {
            filters: QueryFilters::default(),
            order_by: OrderBy::FALLBACK,
            limit: 10,
            include_decayed: true,
        })
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[test]
fn sweep_candidates_excludes_immortal_and_unaccessed_rows() {
    let store = LayerStore::open_in_memory(0.1, 0.9).unwrap();
    store.insert(&sample_record(0.0, "mortal", 0.5)).unwrap();
    store.insert(&sample_record(0.0, "immortal", 0.95)).unwrap();

    let candidates = store.sweep_candidates(0.9, 100).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].content, "mortal");
}

#[test]
fn aggregates_reports_counts_and_means() {
    let store = LayerStore::open_in_memory(0.1, 0.9).unwrap();
    store.insert(&sample_record(10.0, "a", 0.5)).unwrap();
    store.insert(&sample_record(20.0, "b", 0.95)).unwrap();

    let agg = store.aggregates().unwrap();
    assert_eq!(agg.count, 2);
    assert_eq!(agg.immortal_count, 1);
    assert_eq!(agg.max_timestamp, Some(20.0));
}
