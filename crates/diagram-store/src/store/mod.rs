//! Key-value store capability used by the diagram service.
//!
//! The store is a polymorphic capability: any backend that can set, get,
//! delete, and report the time-to-live of an opaque string value satisfies
//! the contract. Production uses Redis; tests use an in-memory map.

mod memory;
mod redis;

use async_trait::async_trait;

use crate::error::DiagramStoreError;

pub use memory::MemoryDiagramStore;
pub use redis::RedisDiagramStore;

/// Remaining lifetime of a key, mirroring the Redis TTL reply
/// (-2 for a missing key, -1 for a key without expiration).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// Key does not exist (never written, deleted, or expired).
    Missing,
    /// Key exists and never expires.
    Unbounded,
    /// Key exists and expires in this many seconds.
    Remaining(u64),
}

/// Capability contract for the external key-value store.
#[async_trait]
pub trait DiagramStore: Send + Sync {
    /// Write `value` at `key`, bounded to `ttl_seconds` when given.
    /// Overwrites unconditionally and restarts any existing countdown.
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> Result<(), DiagramStoreError>;

    /// Read the value at `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, DiagramStoreError>;

    /// Remove `key`. Returns whether a key was actually removed.
    async fn delete(&self, key: &str) -> Result<bool, DiagramStoreError>;

    /// Report the remaining lifetime of `key` without altering it.
    async fn ttl(&self, key: &str) -> Result<KeyTtl, DiagramStoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> bool;
}
