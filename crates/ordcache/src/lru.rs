//! LRU (Least Recently Used) cache implementation
//!
//! Keys are kept in an [`ordkit::LinkedList`] ordered from least to most
//! recently used; the index maps each key to its node handle and value, so
//! lookups, touches and evictions are all O(1).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;

use ordkit::{Error, LinkedList, Result};
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::index::{Entry, Index};

/// Size-bounded LRU cache without internal locking
///
/// The head of the recency list is the next eviction candidate and the tail
/// is the most recently used key. After every call the index and the list
/// hold the same keys, and with a bound set `len() <= max_size()`.
pub struct LruCache<K, V> {
    index: Index<K, V>,
    order: LinkedList<K>,
    max_size: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a cache holding at most `max_size` entries (0 for unbounded)
    pub fn new(max_size: usize) -> Self {
        Self::with_config(CacheConfig::new().with_max_size(max_size))
    }

    /// Create a cache with no size bound
    pub fn unbounded() -> Self {
        Self::with_config(CacheConfig::new())
    }

    /// Create a cache from a [`CacheConfig`]
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            index: Index::with_capacity(config.initial_capacity),
            order: LinkedList::with_capacity(config.initial_capacity),
            max_size: config.max_size,
        }
    }

    /// Get a value, marking the key as most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.index.get(key).ok_or(Error::NoSuchElement)?;
        self.order.move_to_back(entry.handle);
        Ok(&entry.value)
    }

    /// Get a mutable value, marking the key as most recently used
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.index.get_mut(key).ok_or(Error::NoSuchElement)?;
        self.order.move_to_back(entry.handle);
        Ok(&mut entry.value)
    }

    /// Get a value without touching its recency
    pub fn peek<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|entry| &entry.value)
            .ok_or(Error::NoSuchElement)
    }

    /// Check for a key without touching its recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Least recently used entry, the next to be evicted
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let key = self.order.peek_front().ok()?;
        self.index.get(key).map(|entry| (key, &entry.value))
    }

    /// Insert or overwrite a value, marking the key as most recently used
    ///
    /// Returns the overwritten value. Entries evicted to respect the bound
    /// are dropped.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value).0
    }

    /// Insert or overwrite, returning the overwritten value and the number
    /// of entries evicted
    pub(crate) fn insert(&mut self, key: K, value: V) -> (Option<V>, usize) {
        if let Some(entry) = self.index.get_mut(&key) {
            self.order.move_to_back(entry.handle);
            return (Some(mem::replace(&mut entry.value, value)), 0);
        }

        let handle = self.order.push_back(key.clone());
        self.index.set(key, Entry { handle, value });
        (None, self.prune())
    }

    /// Remove a key, returning its value
    ///
    /// Removing an absent key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.index.delete(key)?;
        self.order.remove(entry.handle);
        Some(entry.value)
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Change the bound (0 for unbounded), evicting down to it
    ///
    /// Returns the number of entries evicted.
    pub fn set_max_size(&mut self, max_size: usize) -> usize {
        if max_size != self.max_size {
            debug!(old = self.max_size, new = max_size, "cache bound changed");
        }
        self.max_size = max_size;
        self.prune()
    }

    /// Current bound, 0 when unbounded
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate from least to most recently used without touching recency
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.index.get(key).map(|entry| (key, &entry.value)))
    }

    /// Keys from least to most recently used
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.order.iter()
    }

    /// Evict from the head until the bound holds
    fn prune(&mut self) -> usize {
        if self.max_size == 0 {
            return 0;
        }

        let mut evicted = 0;
        while self.order.len() > self.max_size {
            let Ok((_, key)) = self.order.pop_head() else {
                break;
            };
            self.index.delete(&key);
            evicted += 1;
            trace!(len = self.order.len(), "evicted least recently used entry");
        }

        if evicted > 0 {
            debug!(evicted, len = self.order.len(), max_size = self.max_size, "pruned cache");
        }
        debug_assert_eq!(self.index.len(), self.order.len());
        evicted
    }

    /// Assert that the index and the recency list agree
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.index.len(), self.order.len());
        assert_eq!(self.order.iter().count(), self.order.len());
        assert_eq!(self.order.iter().rev().count(), self.order.len());
        for key in self.order.iter() {
            let entry = self.index.get(key).expect("listed key missing from index");
            assert!(self.order.get(entry.handle) == Some(key));
        }
        if self.max_size > 0 {
            assert!(self.len() <= self.max_size);
        }
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(max_size: usize, keys: std::ops::Range<i32>) -> LruCache<i32, i32> {
        let mut cache = LruCache::new(max_size);
        for i in keys {
            cache.put(i, 100 - i);
            cache.check_invariants();
        }
        cache
    }

    fn keys(cache: &LruCache<i32, i32>) -> Vec<i32> {
        cache.keys().copied().collect()
    }

    #[test]
    fn test_lru_basic() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.get(&1), Ok(&"a"));
        assert_eq!(cache.get(&2), Ok(&"b"));
        assert_eq!(cache.len(), 2);
        cache.check_invariants();
    }

    #[test]
    fn test_lru_empty() {
        let mut cache: LruCache<&str, i32> = LruCache::new(3);

        assert_eq!(cache.get("a"), Err(Error::NoSuchElement));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.remove("a"), None);
        assert!(cache.peek_lru().is_none());
        cache.check_invariants();
    }

    #[test]
    fn test_bounded_put_evicts_oldest() {
        let mut cache = filled(3, 0..4);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&0), Err(Error::NoSuchElement));
        assert_eq!(cache.get(&3), Ok(&97));
        assert_eq!(cache.get(&2), Ok(&98));
        assert_eq!(cache.get(&1), Ok(&99));
        cache.check_invariants();
    }

    #[test]
    fn test_shrink_keeps_most_recent() {
        let mut cache = filled(3, 0..4);

        assert_eq!(cache.set_max_size(2), 1);
        cache.check_invariants();
        assert_eq!(cache.len(), 2);
        assert_eq!(keys(&cache), vec![2, 3]);
        assert_eq!(cache.get(&1), Err(Error::NoSuchElement));
        assert_eq!(cache.get(&2), Ok(&98));
        assert_eq!(cache.get(&3), Ok(&97));
    }

    #[test]
    fn test_shrink_after_reads() {
        let mut cache = filled(3, 0..4);

        // Touch 3, 2, 1 so 1 is most recent and 3 is least recent
        for i in (1..4).rev() {
            cache.get(&i).unwrap();
        }
        cache.set_max_size(2);
        assert_eq!(keys(&cache), vec![2, 1]);
        assert_eq!(cache.get(&3), Err(Error::NoSuchElement));

        assert_eq!(cache.remove(&1), Some(99));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&1), Err(Error::NoSuchElement));

        cache.clear();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&2), Err(Error::NoSuchElement));
        cache.check_invariants();
    }

    #[test]
    fn test_get_protects_from_eviction() {
        let mut cache = filled(3, 0..3);

        cache.get(&0).unwrap();
        cache.put(3, 97);
        cache.check_invariants();

        assert!(cache.contains(&0));
        assert!(!cache.contains(&1));
        assert_eq!(keys(&cache), vec![2, 0, 3]);
    }

    #[test]
    fn test_unbounded_then_bound() {
        let mut cache = filled(0, 1..6);

        cache.get(&1).unwrap();
        assert_eq!(cache.set_max_size(4), 1);

        // 2 was the least recently used after 1 was read
        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        cache.check_invariants();
    }

    #[test]
    fn test_zero_bound_is_unbounded() {
        let mut cache = filled(2, 0..2);

        assert_eq!(cache.set_max_size(0), 0);
        for i in 2..50 {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), 50);
        assert_eq!(cache.max_size(), 0);
        cache.check_invariants();
    }

    #[test]
    fn test_bound_of_one() {
        let mut cache = LruCache::new(1);

        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a"), Err(Error::NoSuchElement));
        assert_eq!(cache.get("b"), Ok(&2));

        cache.put("b", 3);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("b"), Ok(&3));
        cache.check_invariants();
    }

    #[test]
    fn test_lru_overwrite() {
        let mut cache = LruCache::new(2);

        assert_eq!(cache.put(1, "a"), None);
        assert_eq!(cache.put(1, "b"), Some("a"));

        assert_eq!(cache.get(&1), Ok(&"b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overwrite_touches() {
        let mut cache = filled(3, 0..3);

        cache.put(0, 0);
        cache.put(3, 97);
        assert_eq!(keys(&cache), vec![2, 0, 3]);
        assert_eq!(cache.peek(&0), Ok(&0));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cache = filled(3, 0..3);

        assert_eq!(cache.remove(&42), None);
        assert_eq!(keys(&cache), vec![0, 1, 2]);
        cache.check_invariants();
    }

    #[test]
    fn test_remove_then_put() {
        let mut cache = filled(3, 0..3);

        cache.remove(&1);
        cache.put(3, 97);
        cache.put(4, 96);
        cache.check_invariants();
        assert_eq!(keys(&cache), vec![2, 3, 4]);
    }

    #[test]
    fn test_peek_does_not_touch() {
        let mut cache = filled(2, 0..2);

        assert_eq!(cache.peek(&0), Ok(&100));
        assert_eq!(cache.peek_lru(), Some((&0, &100)));
        cache.put(2, 98);
        assert!(!cache.contains(&0));
        assert_eq!(cache.peek(&0), Err(Error::NoSuchElement));
    }

    #[test]
    fn test_get_mut() {
        let mut cache = LruCache::new(2);

        cache.put("a", vec![1]);
        cache.put("b", vec![2]);
        cache.get_mut("a").unwrap().push(3);
        cache.put("c", vec![4]);

        assert_eq!(cache.peek("a"), Ok(&vec![1, 3]));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_borrowed_keys() {
        let mut cache: LruCache<String, u32> = LruCache::new(4);

        cache.put("alpha".to_string(), 1);
        assert_eq!(cache.get("alpha"), Ok(&1));
        assert!(cache.contains("alpha"));
        assert_eq!(cache.remove("alpha"), Some(1));
    }

    #[test]
    fn test_iter_and_debug() {
        let mut cache = filled(0, 0..3);

        cache.get(&0).unwrap();
        let entries: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, vec![(1, 99), (2, 98), (0, 100)]);
        assert_eq!(cache.iter().next_back(), Some((&0, &100)));
        assert_eq!(format!("{:?}", cache), "{1: 99, 2: 98, 0: 100}");
    }

    #[test]
    fn test_initial_capacity_does_not_bound() {
        let mut cache = LruCache::with_config(CacheConfig::new().with_initial_capacity(2));
        for i in 0..10 {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), 10);
        cache.check_invariants();

        let mut cache = LruCache::with_config(
            CacheConfig::new()
                .with_max_size(3)
                .with_initial_capacity(100),
        );
        for i in 0..10 {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), 3);
        assert_eq!(keys(&cache), vec![7, 8, 9]);
        cache.check_invariants();
    }

    #[test]
    fn test_invariants_under_mixed_workload() {
        let mut cache = LruCache::new(8);
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;

        for step in 0..2_000u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let key = (state % 24) as u32;
            match state % 7 {
                0 => {
                    cache.remove(&key);
                }
                1 => {
                    let _ = cache.get(&key);
                }
                2 if step % 97 == 0 => {
                    cache.set_max_size((state % 12) as usize);
                }
                3 if step % 331 == 0 => cache.clear(),
                _ => {
                    cache.put(key, step);
                }
            }
            cache.check_invariants();
        }
    }
}
