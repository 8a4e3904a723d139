//! Memory Store Module
//!
//! In-process `KvStore` with the same observable semantics as Redis for the
//! commands the front-ends use.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KvStore, StoreResult};
use crate::error::StoreError;

// == Memory Store ==
/// HashMap storage behind an async read-write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    // == Keys ==
    async fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }

    // == Get ==
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    // == Set ==
    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    // == Incr ==
    /// Read and write happen under one write lock, so concurrent increments
    /// are never lost.
    async fn incr(&self, key: &str) -> StoreResult<i64> {
        let mut entries = self.entries.write().await;

        let current = match entries.get(key) {
            Some(raw) => parse_integer(raw).ok_or_else(|| {
                StoreError::Command("value is not an integer or out of range".to_string())
            })?,
            None => 0,
        };
        let next = current.checked_add(1).ok_or_else(|| {
            StoreError::Command("increment or decrement would overflow".to_string())
        })?;

        entries.insert(key.to_string(), next.to_string());
        Ok(next)
    }

    // == Ping ==
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Parses a stored value the way Redis INCR does: canonical decimal only, so
/// no `+` sign, no leading zeros, no `-0` and no surrounding whitespace.
fn parse_integer(raw: &str) -> Option<i64> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let canonical = match digits.as_bytes() {
        [] => false,
        [b'0'] => digits.len() == raw.len(),
        [first, ..] => (b'1'..=b'9').contains(first),
    };
    if !canonical {
        return None;
    }
    raw.parse().ok()
}
