use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_cache_capacity() -> usize {
    8
}

fn default_cache_ttl_secs() -> u64 {
    300
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Explicit path to the DPD SQLite store
    pub store_path: Option<String>,
    /// Flat JSON dictionary file overriding the embedded one
    pub fallback_path: Option<String>,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            fallback_path: None,
            cache_capacity: default_cache_capacity(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let store_path = env::var("DPD_DB_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let fallback_path = env::var("FALLBACK_DICT_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let cache_capacity = env::var("DICT_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_cache_capacity);

        let cache_ttl_secs = env::var("DICT_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_cache_ttl_secs);

        Self {
            store_path,
            fallback_path,
            cache_capacity,
            cache_ttl_secs,
        }
    }

    /// Store path resolution order: explicit config/env value, then the
    /// conventional `dpd.db` in the working directory.
    pub fn resolve_store_path(&self) -> PathBuf {
        self.store_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("dpd.db"))
    }
}
