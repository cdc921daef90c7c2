//! ConcurrentLruCache: thread-safe wrapper around [`LruCache`]

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

use ordkit::Result;
use parking_lot::RwLock;

use crate::config::CacheConfig;
use crate::lru::LruCache;
use crate::stats::{CacheStats, StatsSnapshot};

/// LRU cache shared between threads
///
/// Every operation that can reorder or resize the cache (`get` included,
/// since a hit moves the key to the most recently used end) runs under the
/// write lock, so no caller ever sees the index and the recency list out of
/// step. Read-only queries (`len`, `peek`, `contains`, ...) share the read
/// lock. Cloning yields another handle to the same cache.
pub struct ConcurrentLruCache<K, V> {
    /// Index and recency list, guarded together
    cache: Arc<RwLock<LruCache<K, V>>>,

    /// Cache statistics
    stats: Arc<CacheStats>,
}

impl<K, V> ConcurrentLruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a cache holding at most `max_size` entries (0 for unbounded)
    pub fn new(max_size: usize) -> Self {
        Self::with_config(CacheConfig::new().with_max_size(max_size))
    }

    /// Create a cache from a [`CacheConfig`]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            cache: Arc::new(RwLock::new(LruCache::with_config(config))),
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Get a copy of a value, marking the key as most recently used
    pub fn get<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let mut cache = self.cache.write();
        match cache.get(key) {
            Ok(value) => {
                self.stats.record_hit();
                Ok(value.clone())
            }
            Err(err) => {
                self.stats.record_miss();
                Err(err)
            }
        }
    }

    /// Get a copy of a value without touching its recency or the statistics
    pub fn peek<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.cache.read().peek(key).cloned()
    }

    /// Check for a key without touching its recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.read().contains(key)
    }

    /// Insert or overwrite a value, returning the overwritten value
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let mut cache = self.cache.write();
        let (previous, evicted) = cache.insert(key, value);
        if previous.is_some() {
            self.stats.record_update();
        } else {
            self.stats.record_insert();
        }
        self.stats.record_evictions(evicted);
        previous
    }

    /// Remove a key, returning its value
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut cache = self.cache.write();
        let removed = cache.remove(key);
        if removed.is_some() {
            self.stats.record_removal();
        }
        removed
    }

    /// Remove every entry (statistics are kept)
    pub fn clear(&self) {
        self.cache.write().clear();
    }

    /// Change the bound (0 for unbounded), returning how many entries were evicted
    pub fn set_max_size(&self, max_size: usize) -> usize {
        let evicted = self.cache.write().set_max_size(max_size);
        self.stats.record_evictions(evicted);
        evicted
    }

    /// Current bound, 0 when unbounded
    pub fn max_size(&self) -> usize {
        self.cache.read().max_size()
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Keys from least to most recently used
    pub fn keys(&self) -> Vec<K> {
        self.cache.read().keys().cloned().collect()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Copy the current statistics
    pub fn stats_snapshot(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Reset statistics (entries are kept)
    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

impl<K, V> Clone for ConcurrentLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<K, V> Default for ConcurrentLruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K, V> From<LruCache<K, V>> for ConcurrentLruCache<K, V> {
    fn from(cache: LruCache<K, V>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            stats: Arc::new(CacheStats::new()),
        }
    }
}
