use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use mnem_core::config::DecayConfig;
use mnem_core::model::{now_seconds, Layer};
use mnem_coordinator::Coordinator;

use crate::sweep::{sweep_all, SweepStats};
use crate::touch;

/// Owns the decay configuration and the process-wide sweep state: the
/// running flag that prevents overlapping ticks, and the monotonic sweep
/// sequence counter (spec §5 "Shared state").
pub struct DecayEngine {
    coordinator: Arc<Coordinator>,
    config: DecayConfig,
    sweep_running: AtomicBool,
    sequence: AtomicU64,
    last_sweep: RwLock<Option<SweepStats>>,
}

impl DecayEngine {
    pub fn new(coordinator: Arc<Coordinator>, config: DecayConfig) -> DecayEngine {
        DecayEngine {
            coordinator,
            config,
            sweep_running: AtomicBool::new(false),
            sequence: AtomicU64::new(0),
            last_sweep: RwLock::new(None),
        }
    }

    /// The outcome of the most recently completed sweep tick, or `None`
    /// before the first tick has run (spec §11 "sweep sequence numbers and
    /// counters").
    pub fn last_sweep(&self) -> Option<SweepStats> {
        *self.last_sweep.read().unwrap()
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    pub fn effective_importance(&self, importance: f64, last_accessed: Option<f64>, now: f64) -> f64 {
        crate::formula::effective_importance(
            importance,
            last_accessed,
            now,
            self.config.base_rate,
            self.config.immortal_threshold,
        )
    }

    /// Run one sweep tick if no sweep is currently running; a tick that
    /// arrives while one is in progress is dropped, not queued (spec §4.5).
    /// Returns `None` when the tick was dropped.
    pub fn try_sweep(&self) -> Option<SweepStats> {
        if self
            .sweep_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("sweep tick dropped: previous sweep still running");
            return None;
        }

        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let now = now_seconds();
        let stats = sweep_all(
            &self.coordinator,
            now,
            self.config.base_rate,
            self.config.immortal_threshold,
            self.config.sweep_batch_size,
            sequence,
        );

        tracing::info!(
            sequence = stats.sequence,
            rows_updated = stats.rows_updated,
            duration_ms = stats.duration.as_millis() as u64,
            "decay sweep completed"
        );

        *self.last_sweep.write().unwrap() = Some(stats);
        self.sweep_running.store(false, Ordering::Release);
        Some(stats)
    }

    pub fn touch(&self, layer: Layer, ids: &[i64]) {
        touch::touch(&self.coordinator, layer, ids, now_seconds());
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }
}
