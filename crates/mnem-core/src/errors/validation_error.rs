use super::code::ErrorCode;

/// Validation-layer errors. Each variant names the offending field and the
/// specific `ErrorCode` the dispatcher should surface (spec §7 distinguishes
/// `INVALID_LAYER`/`INVALID_CONTENT`/`INVALID_QUERY` from the generic
/// `VALIDATION_ERROR`).
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: {reason}")]
    Field {
        field: String,
        reason: String,
        code: ErrorCode,
    },

    #[error("unknown layer '{name}'")]
    UnknownLayer { name: String },

    #[error("{low} must be <= {high} (field '{field}')")]
    RangeOrder {
        field: String,
        low: String,
        high: String,
    },
}

impl ValidationError {
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            reason: reason.into(),
            code: ErrorCode::ValidationError,
        }
    }

    pub fn with_code(field: impl Into<String>, reason: impl Into<String>, code: ErrorCode) -> Self {
        Self::Field {
            field: field.into(),
            reason: reason.into(),
            code,
        }
    }

    /// The error code this validation failure should surface as.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::Field { code, .. } => *code,
            ValidationError::UnknownLayer { .. } => ErrorCode::InvalidLayer,
            ValidationError::RangeOrder { .. } => ErrorCode::ValidationError,
        }
    }
}
