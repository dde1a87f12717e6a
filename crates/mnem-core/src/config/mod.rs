mod decay_config;
mod observability_config;
mod rate_limit_config;
mod service_config;
mod storage_config;

pub use decay_config::DecayConfig;
pub use observability_config::{LogFormat, ObservabilityConfig};
pub use rate_limit_config::RateLimitConfig;
pub use service_config::ServiceConfig;
pub use storage_config::StorageConfig;
