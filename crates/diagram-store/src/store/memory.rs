//! In-memory implementation of the diagram store capability
//!
//! Backs tests and local development. Expiry is enforced lazily: an entry
//! whose deadline has passed is treated as absent and dropped on access,
//! which matches the observable behavior of the Redis backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

use super::{DiagramStore, KeyTtl};
use crate::error::DiagramStoreError;

struct MemoryEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl MemoryEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// Diagram store backed by a process-local map.
#[derive(Default)]
pub struct MemoryDiagramStore {
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

impl MemoryDiagramStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiagramStore for MemoryDiagramStore {
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> Result<(), DiagramStoreError> {
        let expires_at = ttl_seconds.map(|seconds| Instant::now() + Duration::from_secs(seconds));

        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, DiagramStoreError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            return Ok(None);
        }

        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<bool, DiagramStoreError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        match entries.remove(key) {
            Some(entry) => Ok(!entry.is_expired(now)),
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl, DiagramStoreError> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            return Ok(KeyTtl::Missing);
        }

        match entries.get(key) {
            Some(entry) => match entry.expires_at {
                None => Ok(KeyTtl::Unbounded),
                Some(deadline) => {
                    // Round up so a freshly written key reports its full TTL,
                    // as Redis does.
                    let millis = deadline.saturating_duration_since(now).as_millis();
                    Ok(KeyTtl::Remaining(millis.div_ceil(1000) as u64))
                }
            },
            None => Ok(KeyTtl::Missing),
        }
    }

    async fn ping(&self) -> bool {
        true
    }
}
