use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the layer files live. `cache_root` enables dual-write when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub durable_root: PathBuf,
    pub cache_root: Option<PathBuf>,
}

impl StorageConfig {
    pub fn default_durable_root() -> PathBuf {
        dirs_home()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mnem")
            .join("memory")
    }

    pub fn from_env() -> StorageConfig {
        let durable_root = std::env::var("MNEM_DURABLE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_durable_root());
        let cache_root = std::env::var("MNEM_CACHE_ROOT").ok().map(PathBuf::from);
        StorageConfig {
            durable_root,
            cache_root,
        }
    }
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
