//! Eviction policy implementations

mod fifo;
mod lfu;
mod lru;

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;

use crate::errors::{CacheError, RecoveryHint, Result};
use crate::serialization::ValueSerializer;
use crate::store::StorageAdapter;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Fire the victim's on-expire callback with its decoded value, then delete it.
///
/// The record is deleted even when decoding or the callback fails, so an
/// eviction always frees its slot. The first failure is returned afterwards.
pub(crate) fn release_victim<K, V, S>(
    storage: &mut dyn StorageAdapter<K, V>,
    key: &K,
    serializer: &S,
) -> Result<()>
where
    K: Debug,
    V: DeserializeOwned,
    S: ValueSerializer,
{
    let pending = storage.get_mut(key).and_then(|item| {
        let callback = item.on_expire.take()?;
        Some((callback, serializer.deserialize::<V>(&item.value)))
    });

    let outcome = match pending {
        Some((callback, Ok(value))) => {
            callback(key, value).map_err(|source| {
                tracing::warn!(key = ?key, error = %source, "on-expire callback failed");
                CacheError::ExpireCallback {
                    key: format!("{key:?}"),
                    source,
                    recovery_hint: RecoveryHint::FixCallback,
                }
            })
        }
        Some((_, Err(e))) => Err(e.with_key(format!("{key:?}"))),
        None => Ok(()),
    };

    storage.delete(key);
    outcome
}

/// First key in storage scan order, for entries no ordering structure tracks
pub(crate) fn first_in_scan<K: Clone, V>(storage: &dyn StorageAdapter<K, V>) -> Option<K> {
    storage.entries().next().map(|(key, _)| key.clone())
}
