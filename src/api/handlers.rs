//! API Handlers
//!
//! HTTP request handlers for the generic store endpoints and the shared
//! health check.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::config::{Config, StoreBackend, DEFAULT_COUNTER_KEY};
use crate::error::{AppError, Result, StoreError};
use crate::models::{
    GetResponse, HealthResponse, MessageResponse, StoreContents, UnhealthyResponse,
};
use crate::store::{KvStore, MemoryStore, RedisStore};

/// Application state shared across all handlers.
///
/// Holds the one store handle created at startup; handlers receive it
/// through axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Key-value store shared by every request
    pub store: Arc<dyn KvStore>,
    /// Key incremented by the hit counter
    pub counter_key: Arc<str>,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            counter_key: Arc::from(DEFAULT_COUNTER_KEY),
        }
    }

    /// Replaces the hit counter key.
    pub fn with_counter_key(mut self, key: impl Into<String>) -> Self {
        self.counter_key = Arc::from(key.into());
        self
    }

    /// Creates a new AppState from configuration.
    ///
    /// Creates the store for the configured backend. Redis is dialed on the
    /// first request, so an unreachable server surfaces per request, not here.
    pub fn from_config(config: &Config) -> std::result::Result<Self, StoreError> {
        let store: Arc<dyn KvStore> = match config.backend {
            StoreBackend::Redis => Arc::new(RedisStore::open(&config.redis_url())?),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };
        Ok(Self::new(store).with_counter_key(config.counter_key.clone()))
    }
}

/// Handler for GET /
///
/// Lists every key, then fetches each value one by one. The read is not
/// atomic: a key deleted in between is reported as `null`.
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<StoreContents>> {
    let keys = state.store.keys().await?;

    let mut contents = StoreContents::new();
    for key in keys {
        let value = state.store.get(&key).await?;
        contents.insert(key, value);
    }

    debug!("Listed {} keys", contents.len());
    Ok(Json(contents))
}

/// Handler for POST /set/:key/:value
///
/// Overwrites unconditionally.
pub async fn set_handler(
    State(state): State<AppState>,
    Path((key, value)): Path<(String, String)>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    state.store.set(&key, &value).await?;
    info!("Set key '{}'", key);

    Ok((StatusCode::CREATED, Json(MessageResponse::value_set())))
}

/// Handler for GET /get/:key
///
/// A stored empty string is a present value, not a miss.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.store.get(&key).await? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => {
            debug!("Key '{}' not found", key);
            Err(AppError::KeyNotFound(key))
        }
    }
}

/// Handler for GET /health
///
/// Pings the store. 200 when reachable, 503 otherwise.
pub async fn health_handler(
    State(state): State<AppState>,
) -> std::result::Result<Json<HealthResponse>, (StatusCode, Json<UnhealthyResponse>)> {
    match state.store.ping().await {
        Ok(()) => Ok(Json(HealthResponse::healthy())),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse::new(e.to_string())),
            ))
        }
    }
}
