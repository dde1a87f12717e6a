use std::sync::Arc;
use std::time::Duration;

use crate::engine::DecayEngine;

/// Spawn the cooperative sweep timer. Runs an initial sweep synchronously
/// before returning the handle, so startup-time sweep errors surface before
/// the service reports ready (spec §4.5 "An initial sweep runs at startup").
pub fn spawn(engine: Arc<DecayEngine>) -> tokio::task::JoinHandle<()> {
    engine.try_sweep();

    let interval = Duration::from_secs(engine.config().sweep_interval_minutes.max(1) * 60);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; we already ran the startup sweep.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            engine.try_sweep();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnem_core::config::DecayConfig;
    use mnem_coordinator::Coordinator;

    #[tokio::test]
    async fn spawn_runs_startup_sweep_and_can_be_aborted() {
        let coordinator = Arc::new(Coordinator::open_in_memory(&DecayConfig::default()).unwrap());
        let mut config = DecayConfig::default();
        config.sweep_interval_minutes = 60;
        let engine = Arc::new(DecayEngine::new(coordinator, config));

        let handle = spawn(engine);
        handle.abort();
    }
}
