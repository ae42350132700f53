//! Redis implementation of the diagram store capability

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

use super::{DiagramStore, KeyTtl};
use crate::error::DiagramStoreError;

/// Diagram store backed by a shared Redis instance.
///
/// Holds a single `ConnectionManager` established at startup; clones of it
/// share the underlying multiplexed connection, so each request is one round
/// trip without a per-request handshake.
pub struct RedisDiagramStore {
    connection: ConnectionManager,
}

impl RedisDiagramStore {
    /// Connect to Redis at `url`. Fails if the server is unreachable, which
    /// is fatal at startup since the service is useless without the store.
    pub async fn connect(url: &str) -> Result<Self, DiagramStoreError> {
        let client = redis::Client::open(url).map_err(|e| {
            DiagramStoreError::ConnectionFailed(format!("invalid Redis URL: {}", e))
        })?;

        let connection = ConnectionManager::new(client).await.map_err(|e| {
            DiagramStoreError::ConnectionFailed(format!("failed to connect to Redis: {}", e))
        })?;

        debug!("Connected to Redis at {}", url);

        Ok(Self { connection })
    }
}

#[async_trait]
impl DiagramStore for RedisDiagramStore {
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> Result<(), DiagramStoreError> {
        let mut conn = self.connection.clone();

        debug!("STORE SET {}", key);

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);

        if let Some(seconds) = ttl_seconds {
            cmd.arg("EX").arg(seconds);
        }

        let _: () = cmd
            .query_async(&mut conn)
            .await
            .map_err(DiagramStoreError::Redis)?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DiagramStoreError> {
        let mut conn = self.connection.clone();

        debug!("STORE GET {}", key);

        let result: Option<String> = conn.get(key).await.map_err(DiagramStoreError::Redis)?;

        Ok(result)
    }

    async fn delete(&self, key: &str) -> Result<bool, DiagramStoreError> {
        let mut conn = self.connection.clone();

        debug!("STORE DEL {}", key);

        let deleted: i64 = conn.del(key).await.map_err(DiagramStoreError::Redis)?;

        Ok(deleted > 0)
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl, DiagramStoreError> {
        let mut conn = self.connection.clone();

        debug!("STORE TTL {}", key);

        let ttl: i64 = conn.ttl(key).await.map_err(DiagramStoreError::Redis)?;

        Ok(match ttl {
            -2 => KeyTtl::Missing,
            -1 => KeyTtl::Unbounded,
            seconds => KeyTtl::Remaining(seconds.max(0) as u64),
        })
    }

    async fn ping(&self) -> bool {
        let mut conn = self.connection.clone();

        let pong: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;

        pong.is_ok()
    }
}
