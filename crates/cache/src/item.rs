//! Per-key cache records and the options used to create them

use crate::errors::CallbackError;
use std::fmt;
use std::time::{Duration, SystemTime};

/// Callback fired exactly once when its entry is evicted.
///
/// Receives the key and the decoded value. Runs synchronously inside the
/// eviction, before the entry disappears from storage.
pub type OnExpire<K, V> = Box<dyn FnOnce(&K, V) -> Result<(), CallbackError> + Send>;

/// The record stored for one key
pub struct CacheItem<K, V> {
    /// Encoded value, as produced by the cache's serializer
    pub value: String,
    /// Absolute expiration time; `None` never expires
    pub expiry: Option<SystemTime>,
    /// Access counter maintained by frequency-based policies
    pub frequency: Option<u64>,
    /// Tie-break weight, lower values are evicted first
    pub priority: Option<i64>,
    /// Eviction callback
    pub on_expire: Option<OnExpire<K, V>>,
}

impl<K, V> CacheItem<K, V> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            expiry: None,
            frequency: None,
            priority: None,
            on_expire: None,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_frequency(mut self, frequency: u64) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_expiry(mut self, expiry: SystemTime) -> Self {
        self.expiry = Some(expiry);
        self
    }

    pub fn with_on_expire<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&K, V) -> Result<(), CallbackError> + Send + 'static,
    {
        self.on_expire = Some(Box::new(callback));
        self
    }

    /// Frequency used for ranking; an unset counter ranks as 0
    pub fn frequency_or_default(&self) -> u64 {
        self.frequency.unwrap_or(0)
    }

    /// Priority used for ranking; an unset priority ranks as 0
    pub fn priority_or_default(&self) -> i64 {
        self.priority.unwrap_or(0)
    }

    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        match self.expiry {
            Some(expiry) => now >= expiry,
            None => false,
        }
    }
}

impl<K, V> fmt::Debug for CacheItem<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheItem")
            .field("value", &self.value)
            .field("expiry", &self.expiry)
            .field("frequency", &self.frequency)
            .field("priority", &self.priority)
            .field("on_expire", &self.on_expire.is_some())
            .finish()
    }
}

/// Per-call options for storing a value
pub struct CacheOptions<K, V> {
    /// Time until the entry expires; falls back to the configured default
    pub ttl: Option<Duration>,
    pub priority: Option<i64>,
    pub on_expire: Option<OnExpire<K, V>>,
}

impl<K, V> CacheOptions<K, V> {
    pub fn new() -> Self {
        Self {
            ttl: None,
            priority: None,
            on_expire: None,
        }
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn on_expire<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&K, V) -> Result<(), CallbackError> + Send + 'static,
    {
        self.on_expire = Some(Box::new(callback));
        self
    }
}

impl<K, V> Default for CacheOptions<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
