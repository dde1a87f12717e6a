use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The recognized-keys whitelist for a record's metadata bag (spec §9), with
/// anything outside the whitelist relocated under `custom` rather than
/// rejected outright.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, Value>,
}

impl Metadata {
    const RECOGNIZED_KEYS: [&'static str; 4] =
        ["importance", "emotional_intensity", "tags", "related_ids"];

    /// Parse a raw JSON object into a `Metadata`, relocating any key not on
    /// the recognized list into `custom`. Recognized keys with the wrong
    /// shape are also pushed to `custom` rather than causing a parse error —
    /// shape/range validation is the validator's job, not this constructor's.
    pub fn from_value(value: &Value) -> Metadata {
        let mut out = Metadata::default();
        let Value::Object(map) = value else {
            return out;
        };

        for (key, val) in map {
            match key.as_str() {
                "importance" if val.is_number() => out.importance = val.as_f64(),
                "emotional_intensity" if val.is_number() => {
                    out.emotional_intensity = val.as_f64()
                }
                "tags" if val.is_array() => {
                    out.tags = val
                        .as_array()
                        .unwrap()
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect();
                }
                "related_ids" if val.is_array() => {
                    out.related_ids = val
                        .as_array()
                        .unwrap()
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect();
                }
                _ if Self::RECOGNIZED_KEYS.contains(&key.as_str()) => {
                    out.custom.insert(key.clone(), val.clone());
                }
                _ => {
                    out.custom.insert(key.clone(), val.clone());
                }
            }
        }
        out
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Object(Default::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn relocates_unknown_keys_to_custom() {
        let raw = json!({ "importance": 0.8, "mood": "curious", "source": "cli" });
        let meta = Metadata::from_value(&raw);
        assert_eq!(meta.importance, Some(0.8));
        assert_eq!(meta.custom.get("mood"), Some(&json!("curious")));
        assert_eq!(meta.custom.get("source"), Some(&json!("cli")));
    }

    #[test]
    fn wrong_shaped_recognized_key_falls_back_to_custom() {
        let raw = json!({ "tags": "not-an-array" });
        let meta = Metadata::from_value(&raw);
        assert!(meta.tags.is_empty());
        assert_eq!(meta.custom.get("tags"), Some(&json!("not-an-array")));
    }

    #[test]
    fn non_object_yields_empty_metadata() {
        let raw = json!("just a string");
        let meta = Metadata::from_value(&raw);
        assert_eq!(meta, Metadata::default());
    }
}
