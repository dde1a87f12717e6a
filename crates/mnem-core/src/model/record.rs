use serde::{Deserialize, Serialize};

use super::metadata::Metadata;

/// The single persisted entity (spec §3). One row per record, one table per
/// layer, identical schema across layers.
///
/// Timestamps are seconds-since-epoch `f64`, matching the wire format and
/// the column type used in storage, rather than the teacher's
/// `chrono::DateTime<Utc>` — the decay formula operates directly on
/// fractional epoch seconds and a `DateTime` round trip would add a
/// conversion at every sweep tick for no benefit (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub timestamp: f64,
    pub content: String,
    #[serde(default)]
    pub context: String,
    pub importance: f64,
    pub emotional_intensity: f64,
    #[serde(default)]
    pub metadata: Metadata,
    pub last_accessed: Option<f64>,
    pub effective_importance: Option<f64>,
    pub access_count: i64,
}

impl Record {
    /// Build a fresh record ready to insert: `last_accessed` seeded to the
    /// creation timestamp, `access_count` zero, `effective_importance` left
    /// NULL unless the record is immortal at creation (spec §3 invariant).
    pub fn new(
        timestamp: f64,
        content: String,
        context: String,
        importance: f64,
        emotional_intensity: f64,
        metadata: Metadata,
        immortal_threshold: f64,
    ) -> Record {
        let effective_importance = if importance >= immortal_threshold {
            Some(importance)
        } else {
            None
        };
        Record {
            id: 0,
            timestamp,
            content,
            context,
            importance,
            emotional_intensity,
            metadata,
            last_accessed: Some(timestamp),
            effective_importance,
            access_count: 0,
        }
    }

    pub fn is_immortal(&self, immortal_threshold: f64) -> bool {
        self.importance >= immortal_threshold
    }
}

/// Current wall-clock time as fractional seconds since the Unix epoch.
pub fn now_seconds() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_seeds_last_accessed_to_timestamp() {
        let r = Record::new(100.0, "hi".into(), String::new(), 0.5, 0.5, Metadata::default(), 0.9);
        assert_eq!(r.last_accessed, Some(100.0));
        assert_eq!(r.access_count, 0);
        assert_eq!(r.effective_importance, None);
    }

    #[test]
    fn immortal_record_gets_effective_importance_at_creation() {
        let r = Record::new(100.0, "hi".into(), String::new(), 0.95, 0.5, Metadata::default(), 0.9);
        assert_eq!(r.effective_importance, Some(0.95));
        assert!(r.is_immortal(0.9));
    }
}
