use mnem_core::errors::ValidationError;
use mnem_core::model::Metadata;
use serde_json::Value;

use crate::bounds;

/// Parse and bound-check a caller-supplied metadata object (spec §4.7).
/// Unknown keys are already relocated to `custom` by `Metadata::from_value`;
/// this layer enforces size limits on top of that shape.
pub fn validate_metadata(raw: &Value) -> Result<Metadata, ValidationError> {
    let metadata = Metadata::from_value(raw);

    if metadata.tags.len() > bounds::TAG_MAX_COUNT {
        return Err(ValidationError::field(
            "metadata.tags",
            format!("must have at most {} tags", bounds::TAG_MAX_COUNT),
        ));
    }
    for tag in &metadata.tags {
        if tag.chars().count() > bounds::TAG_MAX_LEN {
            return Err(ValidationError::field(
                "metadata.tags",
                format!("each tag must be at most {} characters", bounds::TAG_MAX_LEN),
            ));
        }
    }

    if metadata.related_ids.len() > bounds::RELATED_ID_MAX_COUNT {
        return Err(ValidationError::field(
            "metadata.related_ids",
            format!(
                "must have at most {} related ids",
                bounds::RELATED_ID_MAX_COUNT
            ),
        ));
    }

    for (key, value) in &metadata.custom {
        if let Value::String(s) = value {
            if s.chars().count() > bounds::METADATA_STRING_VALUE_MAX_LEN {
                return Err(ValidationError::field(
                    format!("metadata.{key}"),
                    format!(
                        "string values must be at most {} characters",
                        bounds::METADATA_STRING_VALUE_MAX_LEN
                    ),
                ));
            }
        }
    }

    let serialized_len = serde_json::to_vec(&metadata).map(|v| v.len()).unwrap_or(0);
    if serialized_len > bounds::METADATA_SERIALIZED_MAX_BYTES {
        return Err(ValidationError::field(
            "metadata",
            format!(
                "serialized metadata must be at most {} bytes, got {}",
                bounds::METADATA_SERIALIZED_MAX_BYTES,
                serialized_len
            ),
        ));
    }

    Ok(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_metadata() {
        let raw = json!({ "importance": 0.5, "tags": ["a", "b"], "mood": "curious" });
        let meta = validate_metadata(&raw).unwrap();
        assert_eq!(meta.tags, vec!["a", "b"]);
    }

    #[test]
    fn rejects_too_many_tags() {
        let tags: Vec<String> = (0..51).map(|i| i.to_string()).collect();
        let raw = json!({ "tags": tags });
        assert!(validate_metadata(&raw).is_err());
    }

    #[test]
    fn rejects_overlong_tag() {
        let raw = json!({ "tags": ["a".repeat(101)] });
        assert!(validate_metadata(&raw).is_err());
    }

    #[test]
    fn rejects_too_many_related_ids() {
        let ids: Vec<String> = (0..101).map(|i| i.to_string()).collect();
        let raw = json!({ "related_ids": ids });
        assert!(validate_metadata(&raw).is_err());
    }

    #[test]
    fn rejects_overlong_custom_string_value() {
        let raw = json!({ "note": "x".repeat(5_001) });
        assert!(validate_metadata(&raw).is_err());
    }

    #[test]
    fn rejects_oversized_serialized_payload() {
        let raw = json!({ "blob": "x".repeat(49_000), "blob2": "y".repeat(2_000) });
        assert!(validate_metadata(&raw).is_err());
    }
}
