use std::sync::Arc;

use mnem_coordinator::Coordinator;
use mnem_decay::DecayEngine;
use mnem_ratelimit::RateLimiter;

/// Author-provided weight defaults when a save omits `metadata.importance`
/// or `metadata.emotional_intensity` (spec §3).
pub const DEFAULT_IMPORTANCE: f64 = 0.7;
pub const DEFAULT_EMOTIONAL_INTENSITY: f64 = 0.5;

/// Everything a handler needs to execute one operation. Constructed once at
/// startup and shared, read-only, across every request (spec §5).
pub struct DispatchContext {
    pub coordinator: Arc<Coordinator>,
    pub decay: Arc<DecayEngine>,
    pub rate_limiter: Arc<RateLimiter>,
    pub debug: bool,
}

impl DispatchContext {
    pub fn new(
        coordinator: Arc<Coordinator>,
        decay: Arc<DecayEngine>,
        rate_limiter: Arc<RateLimiter>,
        debug: bool,
    ) -> DispatchContext {
        DispatchContext {
            coordinator,
            decay,
            rate_limiter,
            debug,
        }
    }
}
