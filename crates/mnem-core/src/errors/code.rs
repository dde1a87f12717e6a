use serde::Serialize;

/// The fixed set of error codes the dispatcher may emit (spec §6/§7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    ValidationError,
    InvalidInput,
    InvalidLayer,
    InvalidContent,
    InvalidQuery,
    RateLimitExceeded,
    DatabaseError,
    ConnectionError,
    WriteError,
    InternalError,
    UnknownTool,
    ConfigurationError,
}

impl ErrorCode {
    /// The wire string for this code, e.g. `"VALIDATION_ERROR"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::InvalidLayer => "INVALID_LAYER",
            ErrorCode::InvalidContent => "INVALID_CONTENT",
            ErrorCode::InvalidQuery => "INVALID_QUERY",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::ConnectionError => "CONNECTION_ERROR",
            ErrorCode::WriteError => "WRITE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::UnknownTool => "UNKNOWN_TOOL",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
        }
    }

    /// The HTTP-mirroring status code for this error kind.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorCode::RateLimitExceeded => 429,
            ErrorCode::DatabaseError
            | ErrorCode::ConnectionError
            | ErrorCode::WriteError
            | ErrorCode::InternalError => 500,
            ErrorCode::ConfigurationError => 503,
            _ => 400,
        }
    }
}
