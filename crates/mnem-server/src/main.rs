mod tracing_init;
mod transport;

use std::sync::Arc;

use mnem_core::config::ServiceConfig;
use mnem_coordinator::Coordinator;
use mnem_decay::DecayEngine;
use mnem_dispatch::DispatchContext;
use mnem_ratelimit::RateLimiter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env();

    tracing_init::install(&config.observability);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "configuration invalid, refusing to start");
        std::process::exit(78); // EX_CONFIG
    }

    tracing::info!(
        durable_root = %config.storage.durable_root.display(),
        dual_write = config.storage.cache_root.is_some(),
        "starting service"
    );

    let coordinator = Arc::new(Coordinator::open(&config.storage, &config.decay)?);
    let decay_engine = Arc::new(DecayEngine::new(coordinator.clone(), config.decay.clone()));
    let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));

    let decay_handle = if config.decay.enabled {
        Some(mnem_decay::scheduler::spawn(decay_engine.clone()))
    } else {
        None
    };
    let cleanup_handle = mnem_ratelimit::spawn(
        rate_limiter.clone(),
        config.rate_limit.cleanup_interval_minutes,
    );

    let ctx = DispatchContext::new(
        coordinator,
        decay_engine,
        rate_limiter,
        config.observability.debug,
    );

    tracing::info!("ready, reading requests from stdin");
    let result = transport::run_stdio_loop(&ctx).await;

    if let Some(handle) = decay_handle {
        handle.abort();
    }
    cleanup_handle.abort();

    tracing::info!("shutdown complete");
    result
}
