//! FIFO (First In, First Out) eviction policy implementation

use super::{first_in_scan, release_victim};
use crate::errors::Result;
use crate::eviction::traits::EvictionPolicy;
use crate::item::CacheItem;
use crate::serialization::{JsonSerializer, ValueSerializer};
use crate::store::StorageAdapter;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::fmt::Debug;

/// FIFO eviction policy: the oldest insert goes first, reads are ignored
pub struct FifoPolicy<K, S = JsonSerializer> {
    /// Insertion order tracking
    insertion_order: VecDeque<K>,
    serializer: S,
}

impl<K> FifoPolicy<K> {
    pub fn new() -> Self {
        Self::with_serializer(JsonSerializer)
    }
}

impl<K> Default for FifoPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> FifoPolicy<K, S> {
    pub fn with_serializer(serializer: S) -> Self {
        Self {
            insertion_order: VecDeque::new(),
            serializer,
        }
    }
}

impl<K, V, S> EvictionPolicy<K, V> for FifoPolicy<K, S>
where
    K: PartialEq + Clone + Debug + Send,
    V: DeserializeOwned,
    S: ValueSerializer + Send,
{
    fn on_access(&mut self, _storage: &mut dyn StorageAdapter<K, V>, _key: &K) {}

    fn on_insert(
        &mut self,
        storage: &mut dyn StorageAdapter<K, V>,
        key: K,
        mut item: CacheItem<K, V>,
    ) {
        item.frequency = None;
        // Re-inserting restarts the key's position at the back
        self.insertion_order.retain(|k| k != &key);
        self.insertion_order.push_back(key.clone());
        tracing::trace!(key = ?key, "fifo insert");
        storage.set(key, item);
    }

    fn on_remove(&mut self, storage: &mut dyn StorageAdapter<K, V>, key: &K) {
        self.insertion_order.retain(|k| k != key);
        storage.delete(key);
    }

    fn evict(&mut self, storage: &mut dyn StorageAdapter<K, V>) -> Result<Option<K>> {
        let mut victim = None;
        while let Some(key) = self.insertion_order.pop_front() {
            if storage.contains(&key) {
                victim = Some(key);
                break;
            }
        }

        let Some(victim) = victim.or_else(|| first_in_scan(&*storage)) else {
            return Ok(None);
        };

        tracing::debug!(key = ?victim, "fifo evicting");
        release_victim(storage, &victim, &self.serializer)?;
        Ok(Some(victim))
    }

    fn clear(&mut self) {
        self.insertion_order.clear();
    }

    fn name(&self) -> &'static str {
        "fifo"
    }
}
