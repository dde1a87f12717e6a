use serde::{Deserialize, Serialize};

/// Rate limiter configuration (spec §4.6). Window width and caps are fixed
/// by the spec; only enable/disable is exposed over the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub window_seconds: u64,
    pub global_cap: u32,
    pub save_cap: u32,
    pub recall_cap: u32,
    pub query_cap: u32,
    pub status_cap: u32,
    pub default_cap: u32,
    pub cleanup_interval_minutes: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            window_seconds: 60,
            global_cap: 300,
            save_cap: 60,
            recall_cap: 120,
            query_cap: 100,
            status_cap: 30,
            default_cap: 60,
            cleanup_interval_minutes: 5,
        }
    }
}

impl RateLimitConfig {
    /// The per-operation cap for a named operation (spec §4.6).
    pub fn cap_for(&self, operation: &str) -> u32 {
        match operation {
            "remember" | "save_to_layer" => self.save_cap,
            "recall" => self.recall_cap,
            "query_layer" => self.query_cap,
            "get_status" | "get_stats" => self.status_cap,
            _ => self.default_cap,
        }
    }
}
