use mnem_core::errors::{ErrorCode, ValidationError};

use crate::bounds;

/// Trim and bound-check free-form content (spec §4.7: 1-100000 chars after
/// trimming).
pub fn validate_content(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim().to_string();
    let len = trimmed.chars().count();
    if len < bounds::CONTENT_MIN_LEN || len > bounds::CONTENT_MAX_LEN {
        return Err(ValidationError::with_code(
            "content",
            format!(
                "must be {}-{} characters after trimming, got {}",
                bounds::CONTENT_MIN_LEN,
                bounds::CONTENT_MAX_LEN,
                len
            ),
            ErrorCode::InvalidContent,
        ));
    }
    Ok(trimmed)
}

/// Trim and bound-check a search query (spec §4.7: 1-1000 chars).
pub fn validate_query(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim().to_string();
    let len = trimmed.chars().count();
    if len < bounds::QUERY_MIN_LEN || len > bounds::QUERY_MAX_LEN {
        return Err(ValidationError::with_code(
            "query",
            format!(
                "must be {}-{} characters after trimming, got {}",
                bounds::QUERY_MIN_LEN,
                bounds::QUERY_MAX_LEN,
                len
            ),
            ErrorCode::InvalidQuery,
        ));
    }
    Ok(trimmed)
}

/// Context is optional free text, bounded but never required (spec §4.7:
/// 0-10000 chars).
pub fn validate_context(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim().to_string();
    if trimmed.chars().count() > bounds::CONTEXT_MAX_LEN {
        return Err(ValidationError::field(
            "context",
            format!("must be at most {} characters", bounds::CONTEXT_MAX_LEN),
        ));
    }
    Ok(trimmed)
}

/// Importance and emotional intensity both live in the unit interval (spec
/// §4.7).
pub fn validate_unit_range(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < bounds::UNIT_RANGE_MIN || value > bounds::UNIT_RANGE_MAX {
        return Err(ValidationError::field(
            field,
            format!(
                "must be between {} and {}, got {}",
                bounds::UNIT_RANGE_MIN,
                bounds::UNIT_RANGE_MAX,
                value
            ),
        ));
    }
    Ok(value)
}

/// A caller-supplied epoch-seconds timestamp must fall within a sane
/// calendar range (spec §4.7: 0 through 2100-01-01T00:00:00Z).
pub fn validate_timestamp(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < bounds::TIMESTAMP_MIN || value > bounds::TIMESTAMP_MAX {
        return Err(ValidationError::field(
            field,
            format!(
                "must be between {} and {}, got {}",
                bounds::TIMESTAMP_MIN,
                bounds::TIMESTAMP_MAX,
                value
            ),
        ));
    }
    Ok(value)
}

/// A result-count limit, clamped to [1,1000] with a default of 10 when the
/// caller omits it (spec §4.7).
pub fn validate_limit(raw: Option<u32>) -> Result<u32, ValidationError> {
    let limit = match raw {
        None => return Ok(bounds::LIMIT_DEFAULT),
        Some(v) => v,
    };
    if limit < bounds::LIMIT_MIN || limit > bounds::LIMIT_MAX {
        return Err(ValidationError::field(
            "limit",
            format!(
                "must be between {} and {}, got {}",
                bounds::LIMIT_MIN,
                bounds::LIMIT_MAX,
                limit
            ),
        ));
    }
    Ok(limit)
}

/// Both ends of a min/max pair, when both are present, must not cross (spec
/// §4.7 "cross-field min <= max").
pub fn validate_range_order(
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<(), ValidationError> {
    if let (Some(low), Some(high)) = (min, max) {
        if low > high {
            return Err(ValidationError::RangeOrder {
                field: field.to_string(),
                low: low.to_string(),
                high: high.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_trims_and_accepts_in_range() {
        assert_eq!(validate_content("  hi  ").unwrap(), "hi");
    }

    #[test]
    fn content_rejects_empty_after_trim() {
        assert!(validate_content("   ").is_err());
    }

    #[test]
    fn content_rejects_over_max_length() {
        let huge = "a".repeat(100_001);
        assert!(validate_content(&huge).is_err());
    }

    #[test]
    fn limit_defaults_when_absent() {
        assert_eq!(validate_limit(None).unwrap(), bounds::LIMIT_DEFAULT);
    }

    #[test]
    fn limit_rejects_out_of_range() {
        assert!(validate_limit(Some(0)).is_err());
        assert!(validate_limit(Some(1001)).is_err());
    }

    #[test]
    fn unit_range_rejects_outside_zero_one() {
        assert!(validate_unit_range("importance", -0.1).is_err());
        assert!(validate_unit_range("importance", 1.1).is_err());
        assert!(validate_unit_range("importance", 0.5).is_ok());
    }

    #[test]
    fn range_order_rejects_inverted_bounds() {
        assert!(validate_range_order("importance", Some(0.8), Some(0.2)).is_err());
        assert!(validate_range_order("importance", Some(0.2), Some(0.8)).is_ok());
        assert!(validate_range_order("importance", None, Some(0.8)).is_ok());
    }
}
