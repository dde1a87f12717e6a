use serde_json::Value;

use mnem_core::errors::{MnemError, MnemResult};

use crate::context::DispatchContext;
use crate::envelope;
use crate::handlers;

/// The fixed operation vocabulary (spec §6). Anything else is `UNKNOWN_TOOL`.
const KNOWN_OPERATIONS: [&str; 6] = [
    "remember",
    "save_to_layer",
    "recall",
    "query_layer",
    "get_status",
    "get_stats",
];

/// Bind a named operation to its handler, admit it through the rate
/// limiter, and assemble the uniform response envelope (spec §4.8). Never
/// panics outward: a handler panic is caught and reported as
/// `INTERNAL_ERROR`, matching the "final catch" the spec requires of the
/// dispatcher (spec §7).
pub fn dispatch(ctx: &DispatchContext, operation: &str, args: &Value) -> Value {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        dispatch_inner(ctx, operation, args)
    }));

    match result {
        Ok(Ok(data)) => envelope::success(operation, data),
        Ok(Err(err)) => {
            log_failure(operation, &err);
            envelope::failure(operation, &err, ctx.debug)
        }
        Err(panic) => {
            let message = panic_message(&panic);
            tracing::error!(tool = operation, %message, "handler panicked");
            let err = MnemError::Internal(message);
            envelope::failure(operation, &err, ctx.debug)
        }
    }
}

fn dispatch_inner(ctx: &DispatchContext, operation: &str, args: &Value) -> MnemResult<Value> {
    admit(ctx, operation)?;

    if !KNOWN_OPERATIONS.contains(&operation) {
        return Err(MnemError::UnknownTool {
            name: operation.to_string(),
        });
    }

    match operation {
        "remember" => handlers::save::remember(ctx, args),
        "save_to_layer" => handlers::save::save_to_layer(ctx, args),
        "recall" => handlers::recall::recall(ctx, args),
        "query_layer" => handlers::query_layer::query_layer(ctx, args),
        "get_status" => handlers::status::get_status(ctx),
        "get_stats" => handlers::stats::get_stats(ctx),
        _ => unreachable!("operation checked against KNOWN_OPERATIONS above"),
    }
}

fn admit(ctx: &DispatchContext, operation: &str) -> MnemResult<()> {
    ctx.rate_limiter.admit(operation).map_err(|denied| {
        tracing::debug!(tool = operation, retry_after_ms = denied.retry_after_ms, "rate limit denied");
        MnemError::RateLimited {
            operation: operation.to_string(),
            retry_after_ms: denied.retry_after_ms,
        }
    })
}

fn log_failure(operation: &str, err: &MnemError) {
    match err {
        MnemError::Store(_) | MnemError::Internal(_) => {
            tracing::error!(tool = operation, error = %err, "operation failed")
        }
        MnemError::RateLimited { .. } => {}
        _ => tracing::debug!(tool = operation, error = %err, "operation rejected"),
    }
}

fn panic_message(panic: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    use mnem_core::config::{DecayConfig, RateLimitConfig};
    use mnem_coordinator::Coordinator;
    use mnem_decay::DecayEngine;
    use mnem_ratelimit::RateLimiter;

    fn test_context() -> DispatchContext {
        let coordinator = Arc::new(Coordinator::open_in_memory(&DecayConfig::default()).unwrap());
        let decay = Arc::new(DecayEngine::new(coordinator.clone(), DecayConfig::default()));
        let rate_limiter = Arc::new(RateLimiter::new(RateLimitConfig::default()));
        DispatchContext::new(coordinator, decay, rate_limiter, false)
    }

    #[test]
    fn unknown_operation_is_a_well_formed_error() {
        let ctx = test_context();
        let response = dispatch(&ctx, "does_not_exist", &json!({}));
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "UNKNOWN_TOOL");
        assert_eq!(response["error"]["statusCode"], 400);
    }

    #[test]
    fn remember_round_trips_through_the_dispatcher() {
        let ctx = test_context();
        let response = dispatch(&ctx, "remember", &json!({ "content": "hello world" }));
        assert_eq!(response["success"], true);
        assert!(response["data"]["id"].as_i64().unwrap() > 0);
    }

    #[test]
    fn validation_error_is_not_internal() {
        let ctx = test_context();
        let response = dispatch(&ctx, "remember", &json!({}));
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["statusCode"], 400);
    }
}
