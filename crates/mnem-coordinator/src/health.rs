use serde::Serialize;

/// Per-layer health (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerStatus {
    Connected,
    Missing,
    Error,
}

/// Top-level health, the worst-of over all layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    Healthy,
    Degraded,
}

impl OverallHealth {
    pub fn worst_of<'a>(statuses: impl IntoIterator<Item = &'a LayerStatus>) -> OverallHealth {
        if statuses
            .into_iter()
            .all(|s| matches!(s, LayerStatus::Connected))
        {
            OverallHealth::Healthy
        } else {
            OverallHealth::Degraded
        }
    }
}
