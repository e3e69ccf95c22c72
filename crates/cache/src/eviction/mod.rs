//! Eviction policies for bounded caches
//!
//! Implements LFU, LRU, and FIFO strategies against a shared
//! [`StorageAdapter`](crate::store::StorageAdapter).

mod factory;
mod policies;
mod traits;

// Re-export public API
pub use factory::{create_eviction_policy, EvictionStrategy};
pub use policies::{FifoPolicy, LfuPolicy, LruPolicy};
pub use traits::EvictionPolicy;

#[cfg(test)]
mod tests;
