//! LFU (Least Frequently Used) eviction policy implementation

use super::release_victim;
use crate::errors::Result;
use crate::eviction::traits::EvictionPolicy;
use crate::item::CacheItem;
use crate::serialization::{JsonSerializer, ValueSerializer};
use crate::store::StorageAdapter;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// LFU (Least Frequently Used) eviction policy
///
/// Frequency lives in each record, so the policy keeps no state of its own.
/// Victim selection is a full scan: lowest frequency wins, ties go to the
/// lowest priority, and remaining ties keep the first entry in scan order.
#[derive(Debug, Clone, Default)]
pub struct LfuPolicy<S = JsonSerializer> {
    serializer: S,
}

impl LfuPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S> LfuPolicy<S> {
    pub fn with_serializer(serializer: S) -> Self {
        Self { serializer }
    }
}

impl<K, V, S> EvictionPolicy<K, V> for LfuPolicy<S>
where
    K: Clone + Debug,
    V: DeserializeOwned,
    S: ValueSerializer + Send,
{
    fn on_access(&mut self, storage: &mut dyn StorageAdapter<K, V>, key: &K) {
        if let Some(item) = storage.get_mut(key) {
            let frequency = item.frequency_or_default().saturating_add(1);
            item.frequency = Some(frequency);
            tracing::trace!(key = ?key, frequency, "lfu access");
        }
    }

    fn on_insert(
        &mut self,
        storage: &mut dyn StorageAdapter<K, V>,
        key: K,
        mut item: CacheItem<K, V>,
    ) {
        item.frequency = Some(1);
        tracing::trace!(key = ?key, "lfu insert");
        storage.set(key, item);
    }

    fn on_remove(&mut self, storage: &mut dyn StorageAdapter<K, V>, key: &K) {
        storage.delete(key);
    }

    fn evict(&mut self, storage: &mut dyn StorageAdapter<K, V>) -> Result<Option<K>> {
        let mut candidate: Option<(&K, u64, i64)> = None;

        for (key, item) in storage.entries() {
            let frequency = item.frequency_or_default();
            let priority = item.priority_or_default();

            let replace = match candidate {
                None => true,
                Some((_, least_frequency, lowest_priority)) => {
                    frequency < least_frequency
                        || (frequency == least_frequency && priority < lowest_priority)
                }
            };
            if replace {
                candidate = Some((key, frequency, priority));
            }
        }

        let Some((victim, frequency, priority)) =
            candidate.map(|(key, frequency, priority)| (key.clone(), frequency, priority))
        else {
            return Ok(None);
        };

        tracing::debug!(key = ?victim, frequency, priority, "lfu evicting");
        release_victim(storage, &victim, &self.serializer)?;
        Ok(Some(victim))
    }

    fn clear(&mut self) {}

    fn name(&self) -> &'static str {
        "lfu"
    }
}
