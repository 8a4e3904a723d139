//! Hit counter front-end
//!
//! Counts page visits with an atomic Redis increment.

use redis_http::api::create_counter_router;
use redis_http::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing();
    server::run("Redis hit counter", create_counter_router).await
}
