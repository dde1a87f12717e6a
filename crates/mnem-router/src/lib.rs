//! Content-based layer routing: weighted pattern bags per layer, emotional
//! and technical observables, and the scoring/boost/tie-break decision rule
//! (spec §4.4). Pure and reentrant — no I/O, no shared mutable state.

mod decision;
mod patterns;
mod scoring;

pub use decision::{analyze, explicit, RouterDecision};
pub use scoring::Firing;
