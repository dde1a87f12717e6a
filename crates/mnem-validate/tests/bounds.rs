use mnem_validate::{validate_query_layer, validate_remember, validate_save_to_layer};
use serde_json::json;

#[test]
fn safe_search_literal_percent_survives_validation_unescaped() {
    // Escaping happens in the storage crate's query compiler; the validator
    // only bounds-checks the raw fragment (spec §8 scenario 5).
    let req = validate_query_layer(&json!({
        "layer": "episodic",
        "options": { "filters": { "content_contains": "100%" } }
    }))
    .unwrap();
    assert_eq!(req.spec.filters.content_contains.as_deref(), Some("100%"));
}

#[test]
fn remember_without_explicit_layer_leaves_routing_to_caller() {
    let req = validate_remember(&json!({ "content": "a plain note" })).unwrap();
    assert!(req.layer.is_none());
}

#[test]
fn save_to_layer_with_oversized_metadata_is_rejected() {
    let result = validate_save_to_layer(&json!({
        "layer": "semantic",
        "content": "fact",
        "metadata": { "blob": "x".repeat(60_000) }
    }));
    assert!(result.is_err());
}

#[test]
fn query_layer_unknown_layer_name_is_rejected() {
    let result = validate_query_layer(&json!({ "layer": "not-a-layer" }));
    assert!(result.is_err());
}
