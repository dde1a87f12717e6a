use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use mnem_core::config::RateLimitConfig;

use crate::window::{Admission, SlidingWindowLog};

/// The operation was denied admission; `retry_after_ms` is always at least
/// 1000 (spec §4.6).
#[derive(Debug, Clone, Copy)]
pub struct Denied {
    pub retry_after_ms: u64,
}

/// Dual sliding-window-log admission control: one global window shared by
/// every operation, plus an independent window per operation name (spec
/// §4.6). A request is admitted only if both windows have room.
pub struct RateLimiter {
    config: RateLimitConfig,
    global: SlidingWindowLog,
    operations: DashMap<String, SlidingWindowLog>,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis() as u64
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> RateLimiter {
        let window_ms = config.window_seconds * 1000;
        let global = SlidingWindowLog::new(config.global_cap, window_ms);
        RateLimiter {
            config,
            global,
            operations: DashMap::new(),
        }
    }

    /// Check admission for `operation` at the current time. Both the global
    /// window and the operation's own window must have capacity; if either
    /// is full the request is denied and neither window is charged (spec
    /// §4.6: the timestamp is only recorded on admission).
    pub fn admit(&self, operation: &str) -> Result<(), Denied> {
        self.admit_at(operation, now_ms())
    }

    fn admit_at(&self, operation: &str, now: u64) -> Result<(), Denied> {
        let window_ms = self.config.window_seconds * 1000;
        let cap = self.config.cap_for(operation);
        let op_window = self
            .operations
            .entry(operation.to_string())
            .or_insert_with(|| SlidingWindowLog::new(cap, window_ms));

        // Peek both windows without charging either: a request must clear
        // the global cap and its own operation cap together or not at all.
        match (self.global.peek(now), op_window.peek(now)) {
            (Admission::Denied { retry_after_ms }, _) => Err(Denied { retry_after_ms }),
            (_, Admission::Denied { retry_after_ms }) => Err(Denied { retry_after_ms }),
            (Admission::Allowed, Admission::Allowed) => {
                self.global.admit(now);
                op_window.admit(now);
                Ok(())
            }
        }
    }

    /// Drop expired timestamps from every tracked window. Invoked by the
    /// periodic cleanup task so idle operation windows don't grow the
    /// `operations` map's memory footprint forever (spec §4.6).
    pub fn cleanup(&self) {
        let now = now_ms();
        self.global.cleanup(now);
        self.operations.retain(|_, window| {
            window.cleanup(now);
            window.len() > 0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_up_to_operation_cap_then_denies() {
        let mut config = RateLimitConfig::default();
        config.save_cap = 2;
        config.global_cap = 1000;
        let limiter = RateLimiter::new(config);

        assert!(limiter.admit_at("remember", 0).is_ok());
        assert!(limiter.admit_at("remember", 0).is_ok());
        let result = limiter.admit_at("remember", 0);
        assert!(result.is_err());
        assert!(result.unwrap_err().retry_after_ms >= 1000);
    }

    #[test]
    fn global_cap_denies_even_when_operation_cap_has_room() {
        let mut config = RateLimitConfig::default();
        config.global_cap = 1;
        config.save_cap = 1000;
        let limiter = RateLimiter::new(config);

        assert!(limiter.admit_at("remember", 0).is_ok());
        assert!(limiter.admit_at("recall", 0).is_err());
    }

    #[test]
    fn distinct_operations_have_independent_caps() {
        let mut config = RateLimitConfig::default();
        config.save_cap = 1;
        config.recall_cap = 1;
        config.global_cap = 1000;
        let limiter = RateLimiter::new(config);

        assert!(limiter.admit_at("remember", 0).is_ok());
        assert!(limiter.admit_at("remember", 0).is_err());
        assert!(limiter.admit_at("recall", 0).is_ok());
    }

    #[test]
    fn denied_request_does_not_charge_either_window() {
        let mut config = RateLimitConfig::default();
        config.save_cap = 1;
        config.global_cap = 1;
        let window_ms = config.window_seconds * 1000;
        let limiter = RateLimiter::new(config);

        assert!(limiter.admit_at("remember", 0).is_ok());
        assert!(limiter.admit_at("remember", 0).is_err());
        // Window advanced past the first entry's expiry: admits again.
        assert!(limiter.admit_at("remember", window_ms + 1).is_ok());
    }
}
