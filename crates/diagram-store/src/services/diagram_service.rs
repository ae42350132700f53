//! Diagram persistence service on top of the store capability

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::DiagramStoreError;
use crate::store::{DiagramStore, KeyTtl};

/// Namespace prefix keeping diagram keys apart from any other key-space
/// sharing the same store.
const KEY_PREFIX: &str = "diagram:";

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDiagram {
    pub id: String,
    /// Seconds until expiry, or `None` when diagrams never expire.
    pub expires_in: Option<u64>,
}

/// Remaining lifetime of a stored diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramTtl {
    /// Remaining seconds, or -1 when the diagram never expires.
    pub ttl: i64,
    /// Absolute expiry timestamp; absent when the diagram never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Service exposing the four diagram operations over a key-value store.
///
/// The store handle is passed in at construction and owned for the service's
/// lifetime, so tests can substitute an in-memory implementation.
pub struct DiagramService {
    store: Arc<dyn DiagramStore>,
    ttl_seconds: u64,
}

impl DiagramService {
    pub fn new(store: Arc<dyn DiagramStore>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    fn storage_key(&self, id: &str) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }

    /// Seconds a freshly saved diagram lives, or `None` with TTL disabled.
    pub fn expires_in(&self) -> Option<u64> {
        (self.ttl_seconds > 0).then_some(self.ttl_seconds)
    }

    /// Store `data` under `id`, replacing any prior value and restarting the
    /// expiry countdown when TTL is enabled.
    pub async fn save(&self, id: &str, data: &Value) -> Result<SavedDiagram, DiagramStoreError> {
        if id.is_empty() || data.is_null() {
            return Err(DiagramStoreError::InvalidInput(
                "Missing required fields: id and data".to_string(),
            ));
        }

        let serialized = serde_json::to_string(data)
            .map_err(|e| DiagramStoreError::Serialization(e.to_string()))?;

        self.store
            .set(&self.storage_key(id), &serialized, self.expires_in())
            .await?;

        match self.expires_in() {
            Some(seconds) => info!("Saved diagram {} (expires in {}s)", id, seconds),
            None => info!("Saved diagram {} (no expiration)", id),
        }

        Ok(SavedDiagram {
            id: id.to_string(),
            expires_in: self.expires_in(),
        })
    }

    /// Return the stored document unchanged. A never-written, deleted, or
    /// expired id is reported as `NotFound` alike; the store keeps no
    /// tombstones to tell them apart.
    pub async fn fetch(&self, id: &str) -> Result<Value, DiagramStoreError> {
        let stored = self.store.get(&self.storage_key(id)).await?;

        match stored {
            Some(serialized) => {
                debug!("Retrieved diagram {}", id);
                let data = serde_json::from_str(&serialized)
                    .unwrap_or_else(|_| Value::String(serialized));
                Ok(data)
            }
            None => Err(DiagramStoreError::NotFound(id.to_string())),
        }
    }

    /// Remove the diagram immediately. Deleting an absent id reports
    /// `NotFound`, a routine outcome rather than a fault.
    pub async fn delete(&self, id: &str) -> Result<(), DiagramStoreError> {
        let removed = self.store.delete(&self.storage_key(id)).await?;

        if !removed {
            return Err(DiagramStoreError::NotFound(id.to_string()));
        }

        info!("Deleted diagram {}", id);
        Ok(())
    }

    /// Report the remaining lifetime of a diagram without altering it.
    pub async fn get_ttl(&self, id: &str) -> Result<DiagramTtl, DiagramStoreError> {
        let ttl = self.store.ttl(&self.storage_key(id)).await?;

        match ttl {
            KeyTtl::Missing => Err(DiagramStoreError::NotFound(id.to_string())),
            KeyTtl::Unbounded => Ok(DiagramTtl {
                ttl: -1,
                expires_at: None,
            }),
            KeyTtl::Remaining(seconds) => Ok(DiagramTtl {
                ttl: seconds as i64,
                expires_at: Some(Utc::now() + Duration::seconds(seconds as i64)),
            }),
        }
    }

    /// Whether the backing store currently answers.
    pub async fn store_connected(&self) -> bool {
        self.store.ping().await
    }
}
