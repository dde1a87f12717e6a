use std::sync::Arc;
use std::time::Duration;

use crate::limiter::RateLimiter;

/// Spawn the cooperative cleanup timer that periodically drops expired
/// timestamps from every tracked window (spec §4.6 "cooperative cleanup
/// every 5 minutes").
pub fn spawn(limiter: Arc<RateLimiter>, cleanup_interval_minutes: u64) -> tokio::task::JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_minutes.max(1) * 60);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            limiter.cleanup();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnem_core::config::RateLimitConfig;

    #[tokio::test]
    async fn spawn_can_be_aborted() {
        let limiter = Arc::new(RateLimiter::new(RateLimitConfig::default()));
        let handle = spawn(limiter, 5);
        handle.abort();
    }
}
