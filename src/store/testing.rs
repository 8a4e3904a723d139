//! Test doubles for the store trait and the Redis wire.

use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};

use super::{KvStore, StoreResult};
use crate::error::StoreError;

/// Store whose every call fails as if Redis were down.
pub(crate) struct UnreachableStore;

fn refused<T>() -> StoreResult<T> {
    Err(StoreError::Connection("connection refused".to_string()))
}

#[async_trait]
impl KvStore for UnreachableStore {
    async fn keys(&self) -> StoreResult<Vec<String>> {
        refused()
    }

    async fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        refused()
    }

    async fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        refused()
    }

    async fn incr(&self, _key: &str) -> StoreResult<i64> {
        refused()
    }

    async fn ping(&self) -> StoreResult<()> {
        refused()
    }
}

/// Starts a minimal RESP server on an ephemeral port and returns its address.
///
/// Replies `+PONG` to PING and `+OK` to everything else. With
/// `drop_first_after_ping`, the first connection is closed right after its
/// first PING reply; later connections are served normally.
pub(crate) async fn spawn_fake_redis(drop_first_after_ping: bool) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut close_after_ping = drop_first_after_ping;
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(serve_connection(stream, close_after_ping));
            close_after_ping = false;
        }
    });

    addr
}

async fn serve_connection(stream: TcpStream, close_after_ping: bool) {
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);

    while let Some(args) = read_command(&mut reader).await {
        let is_ping = args
            .first()
            .map(|cmd| cmd.eq_ignore_ascii_case("PING"))
            .unwrap_or(false);
        let reply: &[u8] = if is_ping { b"+PONG\r\n" } else { b"+OK\r\n" };
        if write.write_all(reply).await.is_err() {
            return;
        }
        if is_ping && close_after_ping {
            return;
        }
    }
}

/// Reads one RESP array of bulk strings.
async fn read_command(reader: &mut BufReader<OwnedReadHalf>) -> Option<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).await.ok()? == 0 {
        return None;
    }
    let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line).await.ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;

        let mut buf = vec![0u8; len + 2];
        reader.read_exact(&mut buf).await.ok()?;
        buf.truncate(len);
        args.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Some(args)
}
