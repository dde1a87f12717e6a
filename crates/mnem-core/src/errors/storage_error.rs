/// Storage-layer errors for SQLite-backed layer stores.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("layer file missing: {path}")]
    LayerMissing { path: String },

    #[error("record not found: layer={layer} id={id}")]
    RecordNotFound { layer: String, id: i64 },
}
