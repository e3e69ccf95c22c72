use crate::item::CacheItem;
use crate::store::{Entries, StorageAdapter};
use indexmap::IndexMap;
use std::hash::Hash;

/// Store whose scan order is first-insertion order.
///
/// Overwriting a key with `set` keeps its original position, and deleting a
/// key preserves the relative order of everything else.
pub struct OrderedStorage<K, V> {
    data: IndexMap<K, CacheItem<K, V>>,
}

impl<K, V> OrderedStorage<K, V> {
    pub fn new() -> Self {
        OrderedStorage {
            data: IndexMap::new(),
        }
    }
}

impl<K, V> Default for OrderedStorage<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> StorageAdapter<K, V> for OrderedStorage<K, V> {
    fn get(&self, key: &K) -> Option<&CacheItem<K, V>> {
        self.data.get(key)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut CacheItem<K, V>> {
        self.data.get_mut(key)
    }

    fn set(&mut self, key: K, item: CacheItem<K, V>) {
        self.data.insert(key, item);
    }

    fn delete(&mut self, key: &K) -> Option<CacheItem<K, V>> {
        self.data.shift_remove(key)
    }

    fn entries(&self) -> Entries<'_, K, V> {
        Box::new(self.data.iter())
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.data.contains_key(key)
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}
