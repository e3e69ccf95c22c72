//! Storage adapters backing the cache
//!
//! A store is the sole owner of `key -> CacheItem` records. Eviction policies
//! borrow it for the duration of each operation and never replace it.

mod memory;
mod ordered;

pub use memory::MemoryStorage;
pub use ordered::OrderedStorage;

use crate::item::CacheItem;

/// Full-scan view over a store's records
pub type Entries<'a, K, V> = Box<dyn Iterator<Item = (&'a K, &'a CacheItem<K, V>)> + 'a>;

/// The storage contract every eviction policy operates against.
///
/// Scan order from [`entries`](StorageAdapter::entries) is unspecified unless
/// the implementation documents otherwise.
pub trait StorageAdapter<K, V> {
    /// Look up a record without side effects
    fn get(&self, key: &K) -> Option<&CacheItem<K, V>>;

    /// Mutable access for read-modify-write of a record
    fn get_mut(&mut self, key: &K) -> Option<&mut CacheItem<K, V>>;

    /// Insert or fully replace the record for `key`
    fn set(&mut self, key: K, item: CacheItem<K, V>);

    /// Remove the record for `key`, returning it if it was present
    fn delete(&mut self, key: &K) -> Option<CacheItem<K, V>>;

    fn entries(&self) -> Entries<'_, K, V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn clear(&mut self);
}
