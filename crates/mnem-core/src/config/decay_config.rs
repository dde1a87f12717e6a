use serde::{Deserialize, Serialize};

/// Decay Engine configuration (spec §4.5). Defaults match the spec exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    pub enabled: bool,
    /// Base decay rate r, per day.
    pub base_rate: f64,
    /// Visibility threshold τ.
    pub visibility_threshold: f64,
    /// Immortal threshold μ.
    pub immortal_threshold: f64,
    /// Sweep interval, in minutes.
    pub sweep_interval_minutes: u64,
    /// Max rows touched per layer per sweep tick.
    pub sweep_batch_size: u32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        DecayConfig {
            enabled: true,
            base_rate: 0.01,
            visibility_threshold: 0.1,
            immortal_threshold: 0.9,
            sweep_interval_minutes: 60,
            sweep_batch_size: 1000,
        }
    }
}

impl DecayConfig {
    pub fn from_env() -> DecayConfig {
        let mut config = DecayConfig::default();
        if let Ok(val) = std::env::var("MNEM_DECAY_ENABLED") {
            if let Ok(parsed) = val.parse() {
                config.enabled = parsed;
            }
        }
        if let Ok(val) = std::env::var("MNEM_DECAY_BASE_RATE") {
            if let Ok(parsed) = val.parse() {
                config.base_rate = parsed;
            }
        }
        if let Ok(val) = std::env::var("MNEM_DECAY_VISIBILITY_THRESHOLD") {
            if let Ok(parsed) = val.parse() {
                config.visibility_threshold = parsed;
            }
        }
        if let Ok(val) = std::env::var("MNEM_DECAY_IMMORTAL_THRESHOLD") {
            if let Ok(parsed) = val.parse() {
                config.immortal_threshold = parsed;
            }
        }
        if let Ok(val) = std::env::var("MNEM_DECAY_SWEEP_INTERVAL_MINUTES") {
            if let Ok(parsed) = val.parse() {
                config.sweep_interval_minutes = parsed;
            }
        }
        if let Ok(val) = std::env::var("MNEM_DECAY_SWEEP_BATCH_SIZE") {
            if let Ok(parsed) = val.parse() {
                config.sweep_batch_size = parsed;
            }
        }
        config
    }
}
