use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// One of the six fixed cognitive partitions. Every layer shares an
/// identical schema in a distinct backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Episodic,
    Semantic,
    Procedural,
    Meta,
    Identity,
    Working,
}

impl Layer {
    /// All six layers in the fixed order used for routing tie-breaks.
    pub const ALL: [Layer; 6] = [
        Layer::Episodic,
        Layer::Semantic,
        Layer::Procedural,
        Layer::Meta,
        Layer::Identity,
        Layer::Working,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Episodic => "episodic",
            Layer::Semantic => "semantic",
            Layer::Procedural => "procedural",
            Layer::Meta => "meta",
            Layer::Identity => "identity",
            Layer::Working => "working",
        }
    }

    /// The backing file name for this layer under a given root.
    pub fn file_name(self) -> String {
        format!("{}_memory.db", self.as_str())
    }

    /// Resolve a caller-supplied layer name, case-folded and alias-resolved,
    /// to a canonical layer. Unknown names are a validation error.
    pub fn resolve(name: &str) -> Result<Layer, ValidationError> {
        let folded = name.trim().to_lowercase();
        let layer = match folded.as_str() {
            "episodic" | "events" | "conversations" => Layer::Episodic,
            "semantic" | "facts" | "knowledge" => Layer::Semantic,
            "procedural" | "skills" | "howto" => Layer::Procedural,
            "meta" | "insights" | "reasoning" => Layer::Meta,
            "identity" | "core" | "self" | "values" => Layer::Identity,
            "working" | "temp" | "scratch" | "wip" => Layer::Working,
            _ => return Err(ValidationError::UnknownLayer { name: name.to_string() }),
        };
        Ok(layer)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_canonical_names() {
        for layer in Layer::ALL {
            assert_eq!(Layer::resolve(layer.as_str()).unwrap(), layer);
        }
    }

    #[test]
    fn resolves_aliases_case_insensitively() {
        assert_eq!(Layer::resolve("CORE").unwrap(), Layer::Identity);
        assert_eq!(Layer::resolve("Scratch").unwrap(), Layer::Working);
        assert_eq!(Layer::resolve("knowledge").unwrap(), Layer::Semantic);
        assert_eq!(Layer::resolve("howto").unwrap(), Layer::Procedural);
        assert_eq!(Layer::resolve("reasoning").unwrap(), Layer::Meta);
        assert_eq!(Layer::resolve("events").unwrap(), Layer::Episodic);
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(Layer::resolve("nonsense").is_err());
    }
}
