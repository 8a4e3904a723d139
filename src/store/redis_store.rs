//! Redis Store
//!
//! `KvStore` backed by a multiplexed connection to a Redis server, opened on
//! first use and reopened on the next command after it breaks.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisResult};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::{KvStore, StoreResult};
use crate::error::StoreError;

/// Redis-backed store.
///
/// Requests share one connection. A command that fails because the connection
/// is gone is not retried; it drops the connection so the next command dials
/// again.
pub struct RedisStore {
    client: redis::Client,
    conn: Mutex<Option<MultiplexedConnection>>,
}

impl RedisStore {
    /// Creates a store for the Redis server at `url` (`redis://host:port/db`).
    ///
    /// Only validates the URL; nothing is dialed until the first command.
    pub fn open(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)?;
        Ok(Self {
            client,
            conn: Mutex::new(None),
        })
    }

    /// Returns the live connection, dialing one if there is none.
    async fn connection(&self) -> StoreResult<MultiplexedConnection> {
        let mut slot = self.conn.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self.client.get_multiplexed_async_connection().await?;
        debug!("Connected to Redis at {}", self.client.get_connection_info().addr);
        *slot = Some(conn.clone());
        Ok(conn)
    }

    /// Maps a command result, forgetting the connection if it is unusable.
    async fn settle<T>(&self, result: RedisResult<T>) -> StoreResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                let err = StoreError::from(err);
                if matches!(err, StoreError::Connection(_)) {
                    warn!("Dropping Redis connection: {}", err);
                    self.conn.lock().await.take();
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn keys(&self) -> StoreResult<Vec<String>> {
        let mut conn = self.connection().await?;
        let result: RedisResult<Vec<String>> = conn.keys("*").await;
        self.settle(result).await
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection().await?;
        let result: RedisResult<Option<String>> = conn.get(key).await;
        self.settle(result).await
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let result: RedisResult<()> = conn.set(key, value).await;
        self.settle(result).await
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        let mut conn = self.connection().await?;
        let result: RedisResult<i64> = conn.incr(key, 1).await;
        self.settle(result).await
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let result: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        self.settle(result).await.map(|_| ())
    }
}
