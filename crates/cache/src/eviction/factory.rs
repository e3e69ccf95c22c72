//! Factory for creating eviction policies

use crate::errors::{CacheError, Result};
use crate::serialization::ValueSerializer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::str::FromStr;

use super::policies::{FifoPolicy, LfuPolicy, LruPolicy};
use super::traits::EvictionPolicy;

/// Eviction algorithm selected when a cache is constructed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionStrategy {
    /// Least frequently used, ties broken by priority
    #[default]
    Lfu,
    /// Least recently used
    Lru,
    /// Oldest insert first
    Fifo,
}

impl FromStr for EvictionStrategy {
    type Err = CacheError;

    fn from_str(policy_type: &str) -> Result<Self> {
        match policy_type.trim().to_lowercase().as_str() {
            "lfu" => Ok(Self::Lfu),
            "lru" => Ok(Self::Lru),
            "fifo" => Ok(Self::Fifo),
            _ => Err(CacheError::invalid_setting(
                format!("Unknown eviction policy: {policy_type}"),
                "lfu",
            )),
        }
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lfu => f.write_str("lfu"),
            Self::Lru => f.write_str("lru"),
            Self::Fifo => f.write_str("fifo"),
        }
    }
}

/// Eviction policy factory
pub fn create_eviction_policy<K, V, S>(
    strategy: EvictionStrategy,
    serializer: S,
) -> Box<dyn EvictionPolicy<K, V>>
where
    K: Hash + Eq + Clone + Debug + Send + 'static,
    V: DeserializeOwned + 'static,
    S: ValueSerializer + Send + 'static,
{
    match strategy {
        EvictionStrategy::Lfu => Box::new(LfuPolicy::with_serializer(serializer)),
        EvictionStrategy::Lru => Box::new(LruPolicy::with_serializer(serializer)),
        EvictionStrategy::Fifo => Box::new(FifoPolicy::with_serializer(serializer)),
    }
}
