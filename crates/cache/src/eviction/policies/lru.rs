//! LRU (Least Recently Used) eviction policy implementation

use super::{first_in_scan, release_victim};
use crate::errors::Result;
use crate::eviction::traits::EvictionPolicy;
use crate::item::CacheItem;
use crate::serialization::{JsonSerializer, ValueSerializer};
use crate::store::StorageAdapter;
use lru::LruCache;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::hash::Hash;

/// LRU (Least Recently Used) eviction policy
pub struct LruPolicy<K: Hash + Eq, S = JsonSerializer> {
    /// Recency order, most recent first
    usage_order: LruCache<K, ()>,
    serializer: S,
}

impl<K: Hash + Eq> LruPolicy<K> {
    pub fn new() -> Self {
        Self::with_serializer(JsonSerializer)
    }
}

impl<K: Hash + Eq> Default for LruPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, S> LruPolicy<K, S> {
    pub fn with_serializer(serializer: S) -> Self {
        Self {
            usage_order: LruCache::unbounded(),
            serializer,
        }
    }

    /// Number of keys whose recency is tracked
    pub fn tracked(&self) -> usize {
        self.usage_order.len()
    }
}

impl<K, V, S> EvictionPolicy<K, V> for LruPolicy<K, S>
where
    K: Hash + Eq + Clone + Debug + Send,
    V: DeserializeOwned,
    S: ValueSerializer + Send,
{
    fn on_access(&mut self, storage: &mut dyn StorageAdapter<K, V>, key: &K) {
        if storage.contains(key) {
            self.usage_order.promote(key);
            tracing::trace!(key = ?key, "lru access");
        }
    }

    fn on_insert(
        &mut self,
        storage: &mut dyn StorageAdapter<K, V>,
        key: K,
        mut item: CacheItem<K, V>,
    ) {
        item.frequency = None;
        // put() on an existing key also moves it to most-recently-used
        self.usage_order.put(key.clone(), ());
        tracing::trace!(key = ?key, "lru insert");
        storage.set(key, item);
    }

    fn on_remove(&mut self, storage: &mut dyn StorageAdapter<K, V>, key: &K) {
        self.usage_order.pop(key);
        storage.delete(key);
    }

    fn evict(&mut self, storage: &mut dyn StorageAdapter<K, V>) -> Result<Option<K>> {
        let mut victim = None;
        while let Some((key, ())) = self.usage_order.pop_lru() {
            if storage.contains(&key) {
                victim = Some(key);
                break;
            }
        }

        let Some(victim) = victim.or_else(|| first_in_scan(&*storage)) else {
            return Ok(None);
        };

        tracing::debug!(key = ?victim, "lru evicting");
        release_victim(storage, &victim, &self.serializer)?;
        Ok(Some(victim))
    }

    fn clear(&mut self) {
        self.usage_order.clear();
    }

    fn name(&self) -> &'static str {
        "lru"
    }
}
