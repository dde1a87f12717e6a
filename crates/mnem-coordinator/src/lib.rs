//! Dual-write coordination: mirrors writes truth→cache, owns read-path
//! selection and degradation, and per-layer/top-level health.

mod coordinator;
mod health;

pub use coordinator::Coordinator;
pub use health::{LayerStatus, OverallHealth};
