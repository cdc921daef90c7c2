//! Key index: maps each cached key to its node handle and value

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;
use ordkit::Handle;

/// Handle of a key's node in the recency list, plus the cached value
#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) handle: Handle,
    pub(crate) value: V,
}

/// Hash index from key to [`Entry`]
///
/// Holds handles only; the recency list owns the nodes.
pub(crate) struct Index<K, V> {
    map: HashMap<K, Entry<V>, RandomState>,
}

impl<K, V> Index<K, V>
where
    K: Hash + Eq,
{
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&Entry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut Entry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get_mut(key)
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Insert or replace, returning the previous entry
    pub(crate) fn set(&mut self, key: K, entry: Entry<V>) -> Option<Entry<V>> {
        self.map.insert(key, entry)
    }

    pub(crate) fn delete<Q>(&mut self, key: &Q) -> Option<Entry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordkit::LinkedList;

    #[test]
    fn test_index_basic() {
        let mut order = LinkedList::new();
        let mut index: Index<String, u32> = Index::with_capacity(4);

        let handle = order.push_back("a".to_string());
        assert!(index.set("a".to_string(), Entry { handle, value: 1 }).is_none());
        assert_eq!(index.len(), 1);
        assert!(index.contains("a"));
        assert_eq!(index.get("a").map(|e| e.value), Some(1));
        assert_eq!(index.get("a").map(|e| e.handle), Some(handle));

        if let Some(entry) = index.get_mut("a") {
            entry.value = 2;
        }
        let previous = index.set("a".to_string(), Entry { handle, value: 3 });
        assert_eq!(previous.map(|e| e.value), Some(2));
        assert_eq!(index.len(), 1);

        assert_eq!(index.delete("a").map(|e| e.value), Some(3));
        assert!(index.delete("a").is_none());

        index.set("b".to_string(), Entry { handle, value: 4 });
        index.clear();
        assert_eq!(index.len(), 0);
    }
}
