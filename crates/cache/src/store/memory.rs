use crate::item::CacheItem;
use crate::store::{Entries, StorageAdapter};
use std::collections::HashMap;
use std::hash::Hash;

/// Hash map backed store with no ordering guarantee
pub struct MemoryStorage<K, V> {
    data: HashMap<K, CacheItem<K, V>>,
}

impl<K, V> MemoryStorage<K, V> {
    pub fn new() -> Self {
        MemoryStorage {
            data: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStorage {
            data: HashMap::with_capacity(capacity),
        }
    }
}

impl<K, V> Default for MemoryStorage<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> StorageAdapter<K, V> for MemoryStorage<K, V> {
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
        self.data.remove(key)
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
