use mnem_core::config::{LogFormat, ObservabilityConfig};
use tracing_subscriber::EnvFilter;

/// Install the process-wide `tracing` subscriber. The log level comes from
/// the observability configuration (spec §6 "log level / format"); format
/// selects between a human-readable layer and structured JSON, matching the
/// two modes the teacher's workspace carries `tracing-subscriber`'s `json`
/// feature for.
pub fn install(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.init(),
    }
}
