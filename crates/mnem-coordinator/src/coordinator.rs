use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use mnem_core::config::{DecayConfig, StorageConfig};
use mnem_core::errors::{MnemError, MnemResult, StorageError};
use mnem_core::model::{Layer, Record};
use mnem_core::query::QuerySpec;
use mnem_core::traits::{LayerAggregates, LayerStoreHandle, RecordUpdate};
use mnem_storage::LayerStore;

use crate::health::{LayerStatus, OverallHealth};

struct LayerPair {
    primary: LayerStore,
    secondary: Option<LayerStore>,
    status: RwLock<LayerStatus>,
}

/// Mirrors writes primary→secondary, owns read-path selection and fallback
/// (spec §4.2). One pair of handles per layer, all six opened at
/// construction.
pub struct Coordinator {
    layers: HashMap<Layer, LayerPair>,
    durable_root: Option<PathBuf>,
    cache_root: Option<PathBuf>,
}

impl Coordinator {
    pub fn open(storage: &StorageConfig, decay: &DecayConfig) -> MnemResult<Coordinator> {
        std::fs::create_dir_all(&storage.durable_root).map_err(|e| {
            MnemError::Configuration(format!(
                "durable root '{}' is not creatable: {e}",
                storage.durable_root.display()
            ))
        })?;

        let cache_usable = match &storage.cache_root {
            Some(root) => std::fs::create_dir_all(root).is_ok(),
            None => false,
        };

        let mut layers = HashMap::new();
        for layer in Layer::ALL {
            let primary_path = storage.durable_root.join(layer.file_name());
            let primary = LayerStore::open(
                &primary_path,
                decay.visibility_threshold,
                decay.immortal_threshold,
            )?;

            let secondary = if cache_usable {
                let cache_root = storage.cache_root.as_ref().unwrap();
                let cache_path = cache_root.join(layer.file_name());
                if !cache_path.exists() && primary_path.exists() {
                    if let Err(e) = std::fs::copy(&primary_path, &cache_path) {
                        tracing::warn!(layer = %layer, error = %e, "cache seeding byte-copy failed");
                    }
                }
                match LayerStore::open(
                    &cache_path,
                    decay.visibility_threshold,
                    decay.immortal_threshold,
                ) {
                    Ok(store) => Some(store),
                    Err(e) => {
                        tracing::warn!(layer = %layer, error = %e, "cache store open failed, degrading to primary-only");
                        None
                    }
                }
            } else {
                None
            };

            layers.insert(
                layer,
                LayerPair {
                    primary,
                    secondary,
                    status: RwLock::new(LayerStatus::Connected),
                },
            );
        }

        Ok(Coordinator {
            layers,
            durable_root: Some(storage.durable_root.clone()),
            cache_root: storage.cache_root.clone(),
        })
    }

    pub fn open_in_memory(decay: &DecayConfig) -> MnemResult<Coordinator> {
        let mut layers = HashMap::new();
        for layer in Layer::ALL {
            let primary = LayerStore::open_in_memory(
                decay.visibility_threshold,
                decay.immortal_threshold,
            )?;
            layers.insert(
                layer,
                LayerPair {
                    primary,
                    secondary: None,
                    status: RwLock::new(LayerStatus::Connected),
                },
            );
        }
        Ok(Coordinator {
            layers,
            durable_root: None,
            cache_root: None,
        })
    }

    fn pair(&self, layer: Layer) -> MnemResult<&LayerPair> {
        self.layers
            .get(&layer)
            .ok_or_else(|| MnemError::Store(StorageError::LayerMissing {
                path: layer.file_name(),
            }))
    }

    pub fn dual_write_enabled(&self) -> bool {
        self.cache_root.is_some()
    }

    pub fn cache_root(&self) -> Option<&PathBuf> {
        self.cache_root.as_ref()
    }

    pub fn durable_root(&self) -> Option<&PathBuf> {
        self.durable_root.as_ref()
    }

    /// The durable file path backing a layer, or `None` for an in-memory
    /// coordinator (spec §11 supplemented health detail).
    pub fn layer_path(&self, layer: Layer) -> Option<std::path::PathBuf> {
        self.pair(layer).ok()?.primary.path().map(Path::to_path_buf)
    }

    /// Insert into the truth store first, then mirror to the cache
    /// (best-effort). Returns (id, wrote_to_cache).
    pub fn insert(&self, layer: Layer, record: &Record) -> MnemResult<(i64, bool)> {
        let pair = self.pair(layer)?;
        let id = pair.primary.insert(record).map_err(|e| {
            *pair.status.write().unwrap() = LayerStatus::Error;
            e
        })?;
        *pair.status.write().unwrap() = LayerStatus::Connected;

        let mut wrote_to_cache = false;
        if let Some(secondary) = &pair.secondary {
            let mut cached = record.clone();
            cached.id = id;
            match secondary.insert(&cached) {
                Ok(_) => wrote_to_cache = true,
                Err(e) => tracing::warn!(layer = %layer, error = %e, "cache write failed, truth write still succeeded"),
            }
        }
        Ok((id, wrote_to_cache))
    }

    /// Read-path selection: prefer the cache when configured; degrade to
    /// truth on any cache read failure.
    pub fn scan(&self, layer: Layer, query: &QuerySpec) -> MnemResult<Vec<Record>> {
        let pair = self.pair(layer)?;
        if let Some(secondary) = &pair.secondary {
            match secondary.scan(query) {
                Ok(rows) => return Ok(rows),
                Err(e) => {
                    tracing::warn!(layer = %layer, error = %e, "cache read failed, degrading to truth store");
                    *pair.status.write().unwrap() = LayerStatus::Error;
                }
            }
        }
        pair.primary.scan(query)
    }

    /// Apply an update batch to the truth store, then mirror to the cache.
    pub fn update_batch(&self, layer: Layer, updates: &[RecordUpdate]) -> MnemResult<usize> {
        let pair = self.pair(layer)?;
        let applied = pair.primary.update_batch(updates)?;
        if let Some(secondary) = &pair.secondary {
            if let Err(e) = secondary.update_batch(updates) {
                tracing::warn!(layer = %layer, error = %e, "cache update_batch failed");
            }
        }
        Ok(applied)
    }

    pub fn sweep_candidates(&self, layer: Layer, immortal_threshold: f64, limit: u32) -> MnemResult<Vec<Record>> {
        let pair = self.pair(layer)?;
        pair.primary.sweep_candidates(immortal_threshold, limit)
    }

    pub fn aggregates(&self, layer: Layer) -> MnemResult<LayerAggregates> {
        let pair = self.pair(layer)?;
        pair.primary.aggregates()
    }

    pub fn layer_status(&self, layer: Layer) -> LayerStatus {
        self.pair(layer)
            .map(|p| *p.status.read().unwrap())
            .unwrap_or(LayerStatus::Missing)
    }

    pub fn overall_health(&self) -> OverallHealth {
        let statuses: Vec<LayerStatus> = Layer::ALL.iter().map(|l| self.layer_status(*l)).collect();
        OverallHealth::worst_of(statuses.iter())
    }
}
