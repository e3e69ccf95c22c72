//! The cache façade
//!
//! Routes public get/set/delete calls through the storage adapter and the
//! configured eviction policy, enforcing capacity and TTL.

use crate::config::CacheConfig;
use crate::errors::Result;
use crate::eviction::{create_eviction_policy, EvictionPolicy};
use crate::item::{CacheItem, CacheOptions};
use crate::serialization::{SerializationFormat, ValueSerializer};
use crate::stats::CacheStats;
use crate::store::{MemoryStorage, StorageAdapter};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::SystemTime;

/// Upper bound on slots reserved up front for a new in-memory store
const PREALLOCATE_LIMIT: usize = 1024;

/// Bounded key-value cache with a pluggable eviction policy
pub struct Cache<K, V, St = MemoryStorage<K, V>> {
    storage: St,
    policy: Box<dyn EvictionPolicy<K, V>>,
    serializer: SerializationFormat,
    config: CacheConfig,
    stats: CacheStats,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone + Debug + Send + 'static,
    V: Serialize + DeserializeOwned + 'static,
{
    /// Create an in-memory cache
    pub fn new(config: CacheConfig) -> Result<Self> {
        let preallocate = config.max_entries.unwrap_or(0).min(PREALLOCATE_LIMIT);
        let storage = MemoryStorage::with_capacity(preallocate);
        Self::with_storage(config, storage)
    }
}

impl<K, V, St> Cache<K, V, St>
where
    K: Hash + Eq + Clone + Debug + Send + 'static,
    V: Serialize + DeserializeOwned + 'static,
    St: StorageAdapter<K, V>,
{
    /// Create a cache over a caller-supplied store
    pub fn with_storage(config: CacheConfig, storage: St) -> Result<Self> {
        config.validate()?;
        let serializer = config.serialization;
        let policy = create_eviction_policy(config.eviction_policy, serializer);

        tracing::debug!(
            max_entries = ?config.max_entries,
            policy = policy.name(),
            serialization = %serializer,
            "cache created"
        );

        Ok(Self {
            storage,
            policy,
            serializer,
            config,
            stats: CacheStats::default(),
        })
    }

    /// Store a value with default options
    pub fn set(&mut self, key: K, value: &V) -> Result<()> {
        self.set_with(key, value, CacheOptions::default())
    }

    /// Store a value, evicting first if a new key would exceed capacity.
    ///
    /// If an eviction fails (its on-expire callback errors, or its stored
    /// value cannot be decoded) the victim is still gone, but this value is
    /// not stored and the error is returned.
    pub fn set_with(&mut self, key: K, value: &V, options: CacheOptions<K, V>) -> Result<()> {
        let encoded = ValueSerializer::serialize(&self.serializer, value)
            .map_err(|e| e.with_key(format!("{key:?}")))?;

        let mut item = CacheItem::new(encoded);
        item.expiry = options
            .ttl
            .or(self.config.default_ttl)
            .and_then(|ttl| SystemTime::now().checked_add(ttl));
        item.priority = options.priority;
        item.on_expire = options.on_expire;

        if !self.storage.contains(&key) {
            self.make_room()?;
        }

        self.policy.on_insert(&mut self.storage, key, item);
        self.stats.inserts += 1;
        Ok(())
    }

    /// Read a value, recording the access with the policy
    pub fn get(&mut self, key: &K) -> Result<Option<V>> {
        let expired = match self.storage.get(key) {
            Some(item) => item.is_expired_at(SystemTime::now()),
            None => {
                self.stats.misses += 1;
                return Ok(None);
            }
        };

        if expired {
            self.expire(key);
            self.stats.misses += 1;
            return Ok(None);
        }

        self.policy.on_access(&mut self.storage, key);
        self.stats.hits += 1;
        self.decode(key)
    }

    /// Read a value without touching policy metadata or statistics
    pub fn peek(&self, key: &K) -> Result<Option<V>> {
        if !self.contains(key) {
            return Ok(None);
        }
        self.decode(key)
    }

    /// Whether a live (unexpired) entry exists for `key`
    pub fn contains(&self, key: &K) -> bool {
        self.storage
            .get(key)
            .is_some_and(|item| !item.is_expired_at(SystemTime::now()))
    }

    /// Remove `key`, returning whether a live entry was present.
    ///
    /// An expired entry is still removed but reports `false`, matching
    /// [`contains`](Self::contains).
    pub fn delete(&mut self, key: &K) -> bool {
        let live = self.contains(key);
        self.policy.on_remove(&mut self.storage, key);
        live
    }

    /// Remove every entry and reset policy tracking
    pub fn clear(&mut self) {
        self.storage.clear();
        self.policy.clear();
    }

    /// Force a single eviction
    pub fn evict(&mut self) -> Result<Option<K>> {
        let outcome = self.policy.evict(&mut self.storage);
        if !matches!(outcome, Ok(None)) {
            self.stats.evictions += 1;
        }
        outcome
    }

    /// Drop every expired entry, returning how many were removed.
    ///
    /// TTL expiry never fires on-expire callbacks; those belong to eviction.
    pub fn purge_expired(&mut self) -> usize {
        let now = SystemTime::now();
        let expired: Vec<K> = self
            .storage
            .entries()
            .filter(|(_, item)| item.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.expire(key);
        }

        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "purged expired entries");
        }
        expired.len()
    }

    /// Number of stored entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Configured entry limit; `None` when the cache is unbounded
    pub fn capacity(&self) -> Option<usize> {
        self.config.max_entries
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Read-only view of the backing store
    pub fn storage(&self) -> &St {
        &self.storage
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    fn make_room(&mut self) -> Result<()> {
        let Some(max_entries) = self.config.max_entries else {
            return Ok(());
        };

        if self.storage.len() >= max_entries {
            self.purge_expired();
        }

        while self.storage.len() >= max_entries {
            match self.evict()? {
                Some(victim) => {
                    tracing::debug!(key = ?victim, policy = self.policy.name(), "evicted to make room");
                }
                None => break,
            }
        }
        Ok(())
    }

    fn expire(&mut self, key: &K) {
        self.policy.on_remove(&mut self.storage, key);
        self.stats.expirations += 1;
        tracing::debug!(key = ?key, "entry expired");
    }

    fn decode(&self, key: &K) -> Result<Option<V>> {
        self.storage
            .get(key)
            .map(|item| {
                self.serializer
                    .deserialize(&item.value)
                    .map_err(|e| e.with_key(format!("{key:?}")))
            })
            .transpose()
    }
}
