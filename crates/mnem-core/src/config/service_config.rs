use serde::{Deserialize, Serialize};

use super::{DecayConfig, ObservabilityConfig, RateLimitConfig, StorageConfig};
use crate::errors::MnemError;

/// Aggregate configuration for the whole service, resolved from the
/// environment at startup (spec §6 "Configuration surface"). There is no
/// file-based layer here — the core's configuration surface is
/// environment-only; CLI parsing and file discovery are outer collaborators
/// (spec §1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub storage: StorageConfig,
    pub decay: DecayConfig,
    pub rate_limit: RateLimitConfig,
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    pub fn from_env() -> ServiceConfig {
        ServiceConfig {
            storage: StorageConfig::from_env(),
            decay: DecayConfig::from_env(),
            rate_limit: RateLimitConfig::default(),
            observability: ObservabilityConfig::from_env(),
        }
    }

    /// Startup-time invariant checks (spec §6 "Exit codes", §7 `CONFIGURATION_ERROR`).
    pub fn validate(&self) -> Result<(), MnemError> {
        if self.decay.base_rate < 0.0 {
            return Err(MnemError::Configuration(
                "decay.base_rate must be non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.decay.visibility_threshold) {
            return Err(MnemError::Configuration(
                "decay.visibility_threshold must be in [0,1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.decay.immortal_threshold) {
            return Err(MnemError::Configuration(
                "decay.immortal_threshold must be in [0,1]".to_string(),
            ));
        }
        if self.decay.sweep_interval_minutes == 0 {
            return Err(MnemError::Configuration(
                "decay.sweep_interval_minutes must be positive".to_string(),
            ));
        }
        ensure_writable_root(&self.storage.durable_root)?;
        Ok(())
    }
}

fn ensure_writable_root(root: &std::path::Path) -> Result<(), MnemError> {
    std::fs::create_dir_all(root).map_err(|e| {
        MnemError::Configuration(format!(
            "durable root '{}' is not creatable: {}",
            root.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_env_config_validates() {
        let mut config = ServiceConfig::from_env();
        config.storage.durable_root = std::env::temp_dir().join("mnem-config-test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let mut config = ServiceConfig::from_env();
        config.storage.durable_root = std::env::temp_dir().join("mnem-config-test-2");
        config.decay.visibility_threshold = 1.5;
        assert!(config.validate().is_err());
    }
}
