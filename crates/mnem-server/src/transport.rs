use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use mnem_dispatch::{dispatch, DispatchContext};

/// One request line on the wire: `{"tool": "...", "args": {...}}`. Framing
/// and transport selection (stdio vs. a socket) belong to an outer
/// collaborator; this is the minimal newline-delimited JSON loop the
/// dispatcher needs to be driven at all (spec §1 leaves "the line-delimited
/// tool transport and its framing" out of scope — this is just enough of it
/// to exercise the dispatcher end to end).
pub async fn run_stdio_loop(ctx: &DispatchContext) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = shutdown_signal() => {
                tracing::info!("shutdown signal received, stopping request loop");
                return Ok(());
            }
        };

        let Some(line) = line else {
            tracing::info!("stdin closed, stopping request loop");
            return Ok(());
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(request) => handle_request(ctx, &request),
            Err(e) => malformed_request_response(&e),
        };

        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }
}

fn handle_request(ctx: &DispatchContext, request: &Value) -> Value {
    let tool = request.get("tool").and_then(Value::as_str);
    let args = request.get("args").cloned().unwrap_or_else(|| serde_json::json!({}));

    match tool {
        Some(tool) => dispatch(ctx, tool, &args),
        None => serde_json::json!({
            "success": false,
            "error": {
                "code": "VALIDATION_ERROR",
                "message": "request is missing a 'tool' field",
                "statusCode": 400,
                "details": null,
            }
        }),
    }
}

fn malformed_request_response(e: &serde_json::Error) -> Value {
    serde_json::json!({
        "success": false,
        "error": {
            "code": "VALIDATION_ERROR",
            "message": format!("request line is not valid JSON: {e}"),
            "statusCode": 400,
            "details": null,
        }
    })
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = terminate.recv() => {}
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn request_missing_tool_field_is_a_validation_error() {
        let ctx = test_context();
        let request = serde_json::json!({ "args": { "content": "hi" } });
        let response = handle_request(&ctx, &request);
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    }

    #[test]
    fn request_with_missing_args_defaults_to_empty_object() {
        let ctx = test_context();
        let request = serde_json::json!({ "tool": "get_status" });
        let response = handle_request(&ctx, &request);
        assert_eq!(response["success"], true);
    }

    #[test]
    fn malformed_json_response_is_well_formed() {
        let err = serde_json::from_str::<Value>("{not json").unwrap_err();
        let response = malformed_request_response(&err);
        assert_eq!(response["success"], false);
        assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
    }
}
