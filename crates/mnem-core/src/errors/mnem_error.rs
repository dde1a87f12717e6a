use super::code::ErrorCode;
use super::sanitize::sanitize_message;
use super::{StorageError, ValidationError};

/// Top-level error type returned by every public operation. All subsystem
/// errors convert into this via `From` impls, mirroring the teacher's
/// `CortexError` aggregation (`StorageError` / `ValidationError` / ... each
/// own their corner, `MnemError` is what the dispatcher actually matches on).
#[derive(Debug, thiserror::Error)]
pub enum MnemError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("rate limit exceeded for '{operation}', retry after {retry_after_ms}ms")]
    RateLimited {
        operation: String,
        retry_after_ms: u64,
    },

    #[error("storage error: {0}")]
    Store(#[from] StorageError),

    #[error("unknown tool '{name}'")]
    UnknownTool { name: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type MnemResult<T> = Result<T, MnemError>;

/// The wire shape of an error response (spec §6).
#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub details: Option<serde_json::Value>,
}

impl MnemError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            MnemError::Validation(e) => e.code(),
            MnemError::RateLimited { .. } => ErrorCode::RateLimitExceeded,
            MnemError::Store(_) => ErrorCode::DatabaseError,
            MnemError::UnknownTool { .. } => ErrorCode::UnknownTool,
            MnemError::Configuration(_) => ErrorCode::ConfigurationError,
            MnemError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Build the sanitized, user-visible error envelope for this error.
    ///
    /// `debug` includes the raw (still path/env-stripped) message even for
    /// `Internal` errors; without it, internal errors collapse to a generic
    /// string per spec §7.
    pub fn to_envelope(&self, debug: bool) -> ErrorEnvelope {
        let code = self.error_code();
        let raw_message = self.to_string();

        let message = match self {
            MnemError::Internal(_) if !debug => "an internal error occurred".to_string(),
            _ => sanitize_message(&raw_message),
        };

        let details = match self {
            MnemError::RateLimited { retry_after_ms, .. } => {
                Some(serde_json::json!({ "retryAfterMs": retry_after_ms }))
            }
            MnemError::Store(e) => Some(serde_json::json!({ "storeCode": store_code(e) })),
            _ => None,
        };

        ErrorEnvelope {
            code: code.as_str(),
            message,
            status_code: code.status_code(),
            details,
        }
    }
}

/// An opaque, stable identifier for a storage error kind — not the sanitized
/// message, just enough for a caller to distinguish error classes.
fn store_code(e: &StorageError) -> &'static str {
    match e {
        StorageError::Sqlite { .. } => "sqlite",
        StorageError::MigrationFailed { .. } => "migration_failed",
        StorageError::LayerMissing { .. } => "layer_missing",
        StorageError::RecordNotFound { .. } => "record_not_found",
    }
}
