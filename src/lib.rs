//! Redis HTTP - minimal web front-ends over a Redis key-value store
//!
//! Two applications share this crate: a generic get/set/list store and a
//! page-visit counter.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use store::{KvStore, MemoryStore, RedisStore};
