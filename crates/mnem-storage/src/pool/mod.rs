//! Connection pool: one writer, a round-robin read pool, shared pragmas.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use mnem_core::errors::MnemResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    pub fn open(path: &Path) -> MnemResult<Self> {
        let writer = WriteConnection::open(path)?;
        let readers = ReadPool::open(path, ReadPool::default_size())?;
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
        })
    }

    pub fn open_in_memory() -> MnemResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        let readers = ReadPool::open_in_memory()?;
        Ok(Self {
            writer,
            readers,
            db_path: None,
        })
    }
}
