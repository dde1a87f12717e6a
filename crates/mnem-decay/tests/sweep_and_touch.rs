use std::sync::Arc;

use mnem_core::config::DecayConfig;
use mnem_core::model::{Layer, Metadata, Record};
use mnem_core::query::{OrderBy, QueryFilters, QuerySpec};
use mnem_coordinator::Coordinator;
use mnem_decay::DecayEngine;

fn any_query(include_decayed: bool) -> QuerySpec {
    QuerySpec {
        filters: QueryFilters::default(),
        order_by: OrderBy::FALLBACK,
        limit: 10,
        include_decayed,
    }
}

#[test]
fn sweep_materializes_effective_importance_for_mortal_rows() {
    let coordinator = Arc::new(Coordinator::open_in_memory(&DecayConfig::default()).unwrap());
    let now = 30.0 * 86_400.0;
    let record = Record::new(0.0, "old memory".into(), String::new(), 0.5, 0.5, Metadata::default(), 0.9);
    coordinator.insert(Layer::Episodic, &record).unwrap();

    let engine = DecayEngine::new(coordinator.clone(), DecayConfig::default());
    // Force "now" for the assertion by recomputing directly; try_sweep uses wall
    // clock, so assert against the formula instead of a live sweep timestamp.
    let expected = engine.effective_importance(0.5, Some(0.0), now);
    assert!((expected - 0.492_6).abs() < 1e-3);

    let stats = engine.try_sweep().expect("sweep should run");
    assert_eq!(stats.rows_updated, 1);

    let rows = coordinator.scan(Layer::Episodic, &any_query(true)).unwrap();
    assert!(rows[0].effective_importance.is_some());
    assert!(rows[0].effective_importance.unwrap() <= 0.5);
}

#[test]
fn immortal_rows_are_never_selected_for_sweep() {
    let coordinator = Arc::new(Coordinator::open_in_memory(&DecayConfig::default()).unwrap());
    let record = Record::new(0.0, "always true".into(), String::new(), 0.95, 0.5, Metadata::default(), 0.9);
    coordinator.insert(Layer::Identity, &record).unwrap();

    let engine = DecayEngine::new(coordinator.clone(), DecayConfig::default());
    let stats = engine.try_sweep().unwrap();
    assert_eq!(stats.rows_updated, 0);

    let rows = coordinator.scan(Layer::Identity, &any_query(true)).unwrap();
    assert_eq!(rows[0].effective_importance, Some(0.95));
}

#[test]
fn touch_increments_access_count_and_advances_last_accessed() {
    let coordinator = Arc::new(Coordinator::open_in_memory(&DecayConfig::default()).unwrap());
    let record = Record::new(0.0, "recall me".into(), String::new(), 0.4, 0.5, Metadata::default(), 0.9);
    let (id, _) = coordinator.insert(Layer::Working, &record).unwrap();

    let engine = DecayEngine::new(coordinator.clone(), DecayConfig::default());
    engine.touch(Layer::Working, &[id]);

    let rows = coordinator.scan(Layer::Working, &any_query(true)).unwrap();
    assert_eq!(rows[0].access_count, 1);
    assert!(rows[0].last_accessed.unwrap() > 0.0);
}

#[test]
fn default_visibility_filter_hides_rows_below_threshold_after_sweep() {
    let coordinator = Arc::new(Coordinator::open_in_memory(&DecayConfig::default()).unwrap());
    // A very old, low-importance record decays well below the 0.1 threshold.
    let record = Record::new(
        -400.0 * 86_400.0,
        "ancient".into(),
        String::new(),
        0.2,
        0.5,
        Metadata::default(),
        0.9,
    );
    coordinator.insert(Layer::Meta, &record).unwrap();

    let engine = DecayEngine::new(coordinator.clone(), DecayConfig::default());
    engine.try_sweep();

    let visible = coordinator.scan(Layer::Meta, &any_query(false)).unwrap();
    let all = coordinator.scan(Layer::Meta, &any_query(true)).unwrap();
    assert_eq!(all.len(), 1);
    assert!(visible.is_empty(), "heavily decayed row should be hidden by default");
}
