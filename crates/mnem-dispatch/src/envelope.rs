use mnem_core::errors::MnemError;
use mnem_core::model::now_seconds;
use serde_json::{json, Value};

/// Build the uniform success envelope (spec §6): `{success, tool, timestamp,
/// data}`.
pub fn success(tool: &str, data: Value) -> Value {
    json!({
        "success": true,
        "tool": tool,
        "timestamp": now_seconds(),
        "data": data,
    })
}

/// Build the uniform error envelope (spec §6/§7): `code`, `message`,
/// `statusCode`, `timestamp`, and `tool` all live under `error`.
pub fn failure(tool: &str, error: &MnemError, debug: bool) -> Value {
    let envelope = error.to_envelope(debug);
    json!({
        "success": false,
        "error": {
            "code": envelope.code,
            "message": envelope.message,
            "statusCode": envelope.status_code,
            "timestamp": now_seconds(),
            "tool": tool,
            "details": envelope.details,
        },
    })
}
