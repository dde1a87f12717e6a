//! The single authoritative exponential-decay formula (spec §4.5). Both the
//! batched sweeper and the read-path visibility filter rely on it; unlike
//! the multiplicative, per-factor formulas elsewhere in this codebase's
//! lineage, there is exactly one input pair (`importance`, `last_accessed`)
//! and one output.

/// Effective importance `E` for a record with importance `i` and
/// last-accessed time `a`, evaluated at time `t` (all in seconds).
///
/// Immortal records (`i >= immortal_threshold`) never decay: `E = i`.
/// Otherwise `E = i * exp(-k * d)` where `d` is the elapsed days since last
/// access and `k = base_rate * (1 - i)` — higher-importance records decay
/// more slowly.
pub fn effective_importance(
    importance: f64,
    last_accessed: Option<f64>,
    now: f64,
    base_rate: f64,
    immortal_threshold: f64,
) -> f64 {
    if importance >= immortal_threshold {
        return importance;
    }
    // A NULL last_accessed is treated as accessed-now: no decay applies
    // until the row is touched or observed (spec §4.5 "NULL tolerance").
    let a = last_accessed.unwrap_or(now);
    let d = ((now - a) / 86_400.0).max(0.0);
    let k = base_rate * (1.0 - importance);
    importance * (-k * d).exp()
}

/// A per-record breakdown of the formula's inputs and output, useful for
/// instrumentation (spec §11 supplemented feature: decay breakdown).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayBreakdown {
    pub importance: f64,
    pub days_elapsed: f64,
    pub rate_k: f64,
    pub effective_importance: f64,
    pub immortal: bool,
}

pub fn breakdown(
    importance: f64,
    last_accessed: Option<f64>,
    now: f64,
    base_rate: f64,
    immortal_threshold: f64,
) -> DecayBreakdown {
    let immortal = importance >= immortal_threshold;
    let a = last_accessed.unwrap_or(now);
    let days_elapsed = ((now - a) / 86_400.0).max(0.0);
    let rate_k = base_rate * (1.0 - importance);
    let value = effective_importance(importance, last_accessed, now, base_rate, immortal_threshold);
    DecayBreakdown {
        importance,
        days_elapsed,
        rate_k,
        effective_importance: value,
        immortal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immortal_records_never_decay() {
        let e = effective_importance(0.95, Some(0.0), 365.0 * 86_400.0, 0.01, 0.9);
        assert_eq!(e, 0.95);
    }

    #[test]
    fn e_at_access_time_equals_importance() {
        let e = effective_importance(0.5, Some(1000.0), 1000.0, 0.01, 0.9);
        assert!((e - 0.5).abs() < 1e-12);
    }

    #[test]
    fn matches_spec_scenario_3() {
        // importance = 0.5, last_accessed = now - 30 days, defaults.
        // E = 0.5 * exp(-0.01 * 0.5 * 30) = 0.5 * exp(-0.15) ~= 0.4303.
        let now = 30.0 * 86_400.0;
        let e = effective_importance(0.5, Some(0.0), now, 0.01, 0.9);
        assert!((e - 0.430_3).abs() < 1e-3, "got {e}");
    }

    #[test]
    fn null_last_accessed_is_treated_as_now_no_decay() {
        let e = effective_importance(0.5, None, 12345.0, 0.01, 0.9);
        assert_eq!(e, 0.5);
    }

    #[test]
    fn monotonic_non_increasing_in_time() {
        let a = 0.0;
        let i = 0.6;
        let mut last = effective_importance(i, Some(a), 0.0, 0.01, 0.9);
        for day in 1..100 {
            let t = day as f64 * 86_400.0;
            let e = effective_importance(i, Some(a), t, 0.01, 0.9);
            assert!(e <= last + 1e-12, "decay increased at day {day}");
            last = e;
        }
    }
}
