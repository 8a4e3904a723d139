//! Hit Counter Handler
//!
//! Page that counts its own visits in the key-value store.

use axum::extract::State;
use tracing::debug;

use super::handlers::AppState;
use crate::error::Result;

/// Sentence returned by the counter page for a given count.
pub fn visits_message(count: i64) -> String {
    format!("La página ha sido cargada {} veces.", count)
}

/// Handler for GET / on the hit counter
///
/// The increment is a single store-side INCR, so concurrent visits are never
/// lost.
pub async fn hit_counter_handler(State(state): State<AppState>) -> Result<String> {
    let count = state.store.incr(&state.counter_key).await?;
    debug!("Counter '{}' at {}", state.counter_key, count);

    Ok(visits_message(count))
}
