//! LayerStore — owns a `ConnectionPool` for one layer file, applies
//! migrations at open, and implements `LayerStoreHandle`.

use std::path::Path;

use mnem_core::errors::MnemResult;
use mnem_core::model::Record;
use mnem_core::query::QuerySpec;
use mnem_core::traits::{LayerAggregates, LayerStoreHandle, RecordUpdate};
use rusqlite::Connection;

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::record_crud;

pub struct LayerStore {
    pool: ConnectionPool,
    visibility_threshold: f64,
    immortal_threshold: f64,
    /// In-memory read-pool connections are isolated databases; route reads
    /// through the writer instead of the read pool in that mode.
    use_read_pool: bool,
}

impl LayerStore {
    pub fn open(path: &Path, visibility_threshold: f64, immortal_threshold: f64) -> MnemResult<Self> {
        let pool = ConnectionPool::open(path)?;
        let store = Self {
            pool,
            visibility_threshold,
            immortal_threshold,
            use_read_pool: true,
        };
        store.initialize()?;
        Ok(store)
    }

    pub fn open_in_memory(visibility_threshold: f64, immortal_threshold: f64) -> MnemResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let store = Self {
            pool,
            visibility_threshold,
            immortal_threshold,
            use_read_pool: false,
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> MnemResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    fn with_reader<F, T>(&self, f: F) -> MnemResult<T>
    where
        F: FnOnce(&Connection) -> MnemResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    /// The backing file path, or `None` for an in-memory store (spec §11
    /// supplemented health detail: per-layer `path` field).
    pub fn path(&self) -> Option<&Path> {
        self.pool.db_path.as_deref()
    }
}

impl LayerStoreHandle for LayerStore {
    fn insert(&self, record: &Record) -> MnemResult<i64> {
        self.pool
            .writer
            .with_conn_sync(|conn| record_crud::insert_record(conn, record))
    }

    fn scan(&self, query: &QuerySpec) -> MnemResult<Vec<Record>> {
        self.with_reader(|conn| record_crud::scan_records(conn, query, self.visibility_threshold))
    }

    fn update_batch(&self, updates: &[RecordUpdate]) -> MnemResult<usize> {
        self.pool
            .writer
            .with_conn_sync(|conn| record_crud::update_batch(conn, updates))
    }

    fn sweep_candidates(&self, immortal_threshold: f64, limit: u32) -> MnemResult<Vec<Record>> {
        self.with_reader(|conn| record_crud::sweep_candidates(conn, immortal_threshold, limit))
    }

    fn aggregates(&self) -> MnemResult<LayerAggregates> {
        self.with_reader(|conn| {
            record_crud::aggregates(conn, self.immortal_threshold, self.visibility_threshold)
        })
    }
}
