use serde::{Deserialize, Serialize};

/// Ambient logging/debug configuration. The transport, the structured
/// logger itself, and audit-log buffering are external collaborators (spec
/// §1); this just carries the knobs the spec's configuration surface (§6)
/// says bind to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: LogFormat,
    pub audit_log_path: Option<String>,
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        ObservabilityConfig {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            audit_log_path: None,
            debug: false,
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> ObservabilityConfig {
        let mut config = ObservabilityConfig::default();
        if let Ok(val) = std::env::var("MNEM_LOG_LEVEL") {
            config.log_level = val;
        }
        if let Ok(val) = std::env::var("MNEM_LOG_FORMAT") {
            config.log_format = match val.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            };
        }
        if let Ok(val) = std::env::var("MNEM_AUDIT_LOG_PATH") {
            config.audit_log_path = Some(val);
        }
        if let Ok(val) = std::env::var("MNEM_DEBUG") {
            config.debug = matches!(val.as_str(), "1" | "true" | "TRUE" | "yes");
        }
        config
    }
}
