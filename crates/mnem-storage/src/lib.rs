//! SQLite-backed layer stores: schema, additive migration, and the query
//! compiler that turns a structured filter into a parameterized scan.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::LayerStore;

use mnem_core::errors::StorageError;

/// Wrap a raw sqlite/driver error string as a `StorageError`.
pub fn to_storage_err(message: impl Into<String>) -> mnem_core::errors::MnemError {
    mnem_core::errors::MnemError::Store(StorageError::Sqlite {
        message: message.into(),
    })
}
