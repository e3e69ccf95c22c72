//! Core eviction policy trait definition

use crate::errors::Result;
use crate::item::CacheItem;
use crate::store::StorageAdapter;

/// Eviction policy trait
///
/// Every operation runs to completion against the borrowed store. Callers
/// sharing a cache across threads must hold one lock around each call.
pub trait EvictionPolicy<K, V>: Send {
    /// Record a read of `key`. Absent keys are ignored.
    fn on_access(&mut self, storage: &mut dyn StorageAdapter<K, V>, key: &K);

    /// Store `item` under `key`, reinitializing all policy metadata
    fn on_insert(&mut self, storage: &mut dyn StorageAdapter<K, V>, key: K, item: CacheItem<K, V>);

    /// Remove `key` from storage along with its metadata
    fn on_remove(&mut self, storage: &mut dyn StorageAdapter<K, V>, key: &K);

    /// Remove exactly one victim and return its key, or `None` when empty.
    ///
    /// A failing on-expire callback or an undecodable stored value is
    /// reported as an error, but the victim is removed either way.
    fn evict(&mut self, storage: &mut dyn StorageAdapter<K, V>) -> Result<Option<K>>;

    /// Drop any auxiliary tracking state
    fn clear(&mut self);

    /// Short policy name for logs
    fn name(&self) -> &'static str;
}
