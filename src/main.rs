//! Redis HTTP - generic key-value front-end
//!
//! Lists, sets and gets string values in Redis over HTTP.

use redis_http::api::create_store_router;
use redis_http::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::init_tracing();
    server::run("Redis HTTP key-value front-end", create_store_router).await
}
