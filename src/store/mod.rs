//! Store Module
//!
//! Key-value store abstraction used by the handlers, with a networked Redis
//! implementation and an in-process one.

mod memory;
mod redis_store;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::error::StoreError;

// Re-export public types
pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Store Trait ==
/// Operations the HTTP front-ends need from a key-value store.
///
/// Keys and values are opaque strings. Implementations must be safe to share
/// across request tasks.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Returns every key currently present, in no particular order.
    async fn keys(&self) -> StoreResult<Vec<String>>;

    /// Returns the value stored under `key`, or `None` if it is absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Atomically increments the integer stored under `key` by one and
    /// returns the new value. An absent key counts as zero.
    async fn incr(&self, key: &str) -> StoreResult<i64>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
