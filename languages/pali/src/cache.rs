//! Process-wide memoization of flat dictionaries loaded from disk.
//!
//! Interactive callers re-run the pipeline on every input block; without a
//! cache each run would re-read and re-parse the fallback file. Entries are
//! bounded by LRU capacity and expire by TTL, and `invalidate`/`clear` give
//! an explicit reload path.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use lru::LruCache;
use vacana_core::dictionary::LoadError;

use crate::fallback::{FlatDictionary, FlatDictionaryLoader};

const DEFAULT_CAPACITY: usize = 8;
const DEFAULT_TTL_SECS: u64 = 300;

struct CachedDict {
    dict: Arc<FlatDictionary>,
    loaded_at: Instant,
}

impl CachedDict {
    fn is_valid(&self, ttl: Duration) -> bool {
        self.loaded_at.elapsed() < ttl
    }
}

pub struct FallbackCache {
    cache: RwLock<LruCache<PathBuf, CachedDict>>,
    ttl: Duration,
}

impl FallbackCache {
    pub fn new(capacity: usize, ttl_seconds: u64) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to >= 1");
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Shared process-wide instance, initialized on first use
    pub fn shared() -> &'static FallbackCache {
        static SHARED: OnceLock<FallbackCache> = OnceLock::new();
        SHARED.get_or_init(|| FallbackCache::new(DEFAULT_CAPACITY, DEFAULT_TTL_SECS))
    }

    /// Load a dictionary file, reusing the previous load while it is fresh
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<FlatDictionary>, LoadError> {
        if let Ok(mut cache) = self.cache.write() {
            if let Some(cached) = cache.get(path) {
                if cached.is_valid(self.ttl) {
                    tracing::debug!("Dictionary cache hit: {}", path.display());
                    return Ok(Arc::clone(&cached.dict));
                }
                tracing::debug!("Dictionary cache entry expired: {}", path.display());
            }
        }

        let dict = Arc::new(FlatDictionaryLoader::load_from_file(path)?);

        if let Ok(mut cache) = self.cache.write() {
            cache.put(
                path.to_path_buf(),
                CachedDict {
                    dict: Arc::clone(&dict),
                    loaded_at: Instant::now(),
                },
            );
        }

        Ok(dict)
    }

    /// Drop a single cached file so the next access reloads it
    pub fn invalidate(&self, path: &Path) {
        if let Ok(mut cache) = self.cache.write() {
            cache.pop(path);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
