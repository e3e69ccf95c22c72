//! Thread-safe cache handle
//!
//! Policy operations are read-then-write sequences, so a single lock is held
//! across each whole cache call.

use crate::cache::Cache;
use crate::config::CacheConfig;
use crate::errors::Result;
use crate::item::CacheOptions;
use crate::stats::CacheStats;
use crate::store::{MemoryStorage, StorageAdapter};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Cloneable handle to a cache guarded by one mutex
pub struct SharedCache<K, V, St = MemoryStorage<K, V>> {
    inner: Arc<Mutex<Cache<K, V, St>>>,
}

impl<K, V, St> Clone for SharedCache<K, V, St> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone + Debug + Send + 'static,
    V: Serialize + DeserializeOwned + 'static,
{
    pub fn new(config: CacheConfig) -> Result<Self> {
        Ok(Self::from_cache(Cache::new(config)?))
    }
}

impl<K, V, St> SharedCache<K, V, St>
where
    K: Hash + Eq + Clone + Debug + Send + 'static,
    V: Serialize + DeserializeOwned + 'static,
    St: StorageAdapter<K, V>,
{
    pub fn from_cache(cache: Cache<K, V, St>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn set(&self, key: K, value: &V) -> Result<()> {
        self.inner.lock().set(key, value)
    }

    pub fn set_with(&self, key: K, value: &V, options: CacheOptions<K, V>) -> Result<()> {
        self.inner.lock().set_with(key, value, options)
    }

    pub fn get(&self, key: &K) -> Result<Option<V>> {
        self.inner.lock().get(key)
    }

    pub fn peek(&self, key: &K) -> Result<Option<V>> {
        self.inner.lock().peek(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn delete(&self, key: &K) -> bool {
        self.inner.lock().delete(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn evict(&self) -> Result<Option<K>> {
        self.inner.lock().evict()
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Run `f` with exclusive access to the underlying cache
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut Cache<K, V, St>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
