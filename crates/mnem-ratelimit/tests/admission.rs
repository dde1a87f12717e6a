use mnem_core::config::RateLimitConfig;
use mnem_ratelimit::RateLimiter;

#[test]
fn sixtieth_remember_admits_sixty_first_denies_with_retry_after_at_least_one_second() {
    let limiter = RateLimiter::new(RateLimitConfig::default());

    for _ in 0..60 {
        assert!(limiter.admit("remember").is_ok());
    }

    let denied = limiter.admit("remember").unwrap_err();
    assert!(denied.retry_after_ms >= 1000);
}

#[test]
fn recall_succeeds_while_remember_is_capped() {
    let limiter = RateLimiter::new(RateLimitConfig::default());

    for _ in 0..60 {
        limiter.admit("remember").unwrap();
    }
    assert!(limiter.admit("remember").is_err());

    assert!(limiter.admit("recall").is_ok());
}

#[test]
fn unknown_operation_falls_back_to_default_cap() {
    let mut config = RateLimitConfig::default();
    config.default_cap = 2;
    config.global_cap = 1000;
    let limiter = RateLimiter::new(config);

    assert!(limiter.admit("get_stats_custom_thing").is_ok());
    assert!(limiter.admit("get_stats_custom_thing").is_ok());
    assert!(limiter.admit("get_stats_custom_thing").is_err());
}

#[test]
fn global_cap_is_shared_across_every_operation() {
    let mut config = RateLimitConfig::default();
    config.global_cap = 5;
    config.save_cap = 1000;
    config.recall_cap = 1000;
    let limiter = RateLimiter::new(config);

    for _ in 0..5 {
        assert!(limiter.admit("remember").is_ok());
    }
    let denied = limiter.admit("recall").unwrap_err();
    assert!(denied.retry_after_ms >= 1000);
}
