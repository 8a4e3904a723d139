//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Counter key used by the hit counter when `HIT_COUNTER_KEY` is unset.
pub const DEFAULT_COUNTER_KEY: &str = "hits";

/// Which key-value store implementation backs the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Networked Redis server
    Redis,
    /// In-process map, for running without a Redis server
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("unknown store backend '{}', expected 'redis' or 'memory'", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis host name or address
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// Redis logical database index
    pub redis_db: i64,
    /// HTTP bind address
    pub server_host: String,
    /// HTTP server port
    pub server_port: u16,
    /// Key holding the hit counter
    pub counter_key: String,
    /// Store implementation
    pub backend: StoreBackend,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_HOST` - Redis host (default: redis)
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `REDIS_DB` - Redis database index (default: 0)
    /// - `SERVER_HOST` - HTTP bind address (default: 0.0.0.0)
    /// - `SERVER_PORT` - HTTP server port (default: 5000)
    /// - `HIT_COUNTER_KEY` - Counter key (default: hits)
    /// - `KV_BACKEND` - `redis` or `memory` (default: redis)
    ///
    /// Numeric variables that are set but do not parse are an error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            redis_host: env::var("REDIS_HOST").unwrap_or(defaults.redis_host),
            redis_port: parse_var("REDIS_PORT")?.unwrap_or(defaults.redis_port),
            redis_db: parse_var("REDIS_DB")?.unwrap_or(defaults.redis_db),
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT")?.unwrap_or(defaults.server_port),
            counter_key: env::var("HIT_COUNTER_KEY").unwrap_or(defaults.counter_key),
            backend: parse_var("KV_BACKEND")?.unwrap_or(defaults.backend),
        })
    }

    /// Connection URL for the Redis client.
    pub fn redis_url(&self) -> String {
        format!(
            "redis://{}:{}/{}",
            self.redis_host, self.redis_port, self.redis_db
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_host: "redis".to_string(),
            redis_port: 6379,
            redis_db: 0,
            server_host: "0.0.0.0".to_string(),
            server_port: 5000,
            counter_key: DEFAULT_COUNTER_KEY.to_string(),
            backend: StoreBackend::Redis,
        }
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}
