//! In-process key-value cache with pluggable eviction
//!
//! This crate provides:
//! - A storage adapter contract with hash map and insertion-ordered stores
//! - LFU, LRU, and FIFO eviction policies behind one trait
//! - Per-entry TTL, priority, and on-expire callbacks
//! - JSON and bincode value encodings
//! - A single-lock shared handle for multi-threaded use

pub mod cache;
pub mod concurrent;
pub mod config;
pub mod errors;
pub mod eviction;
pub mod item;
pub mod serialization;
pub mod stats;
pub mod store;
pub mod telemetry;

pub use cache::Cache;
pub use concurrent::SharedCache;
pub use config::{CacheConfig, CacheConfigBuilder, CacheConfigLoader, ConfigSource};
pub use errors::{CacheError, CallbackError, Error, RecoveryHint, Result, SerializationOp};
pub use eviction::{
    create_eviction_policy, EvictionPolicy, EvictionStrategy, FifoPolicy, LfuPolicy, LruPolicy,
};
pub use item::{CacheItem, CacheOptions, OnExpire};
pub use serialization::{BincodeSerializer, JsonSerializer, SerializationFormat, ValueSerializer};
pub use stats::CacheStats;
pub use store::{Entries, MemoryStorage, OrderedStorage, StorageAdapter};
