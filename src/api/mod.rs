//! API Module
//!
//! HTTP handlers and routing for both front-ends.
//!
//! # Endpoints (generic store)
//! - `GET /` - All key-value pairs
//! - `POST /set/:key/:value` - Store a value
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /health` - Health check endpoint
//!
//! # Endpoints (hit counter)
//! - `GET /` - Increment and report the visit counter
//! - `GET /health` - Health check endpoint

pub mod counter;
pub mod handlers;
pub mod routes;

pub use counter::*;
pub use handlers::*;
pub use routes::{create_counter_router, create_store_router};
