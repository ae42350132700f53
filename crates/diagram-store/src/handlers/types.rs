//! Request and response types for diagram handlers

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::DiagramService;

/// Application state for diagram handlers
pub struct AppState {
    pub diagram_service: Arc<DiagramService>,
}

// =============================================================================
// Request Types
// =============================================================================

/// Request to save a diagram
///
/// Both fields are optional at the serde level so a structurally incomplete
/// request surfaces as the service's `InvalidInput` error instead of a
/// framework rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaveDiagramRequest {
    /// Identifier the diagram is stored under
    #[schema(example = "d1")]
    pub id: Option<String>,

    /// The diagram document (any JSON value, stored verbatim)
    #[schema(example = json!({"tables": []}))]
    pub data: Option<Value>,
}

// =============================================================================
// Response Types
// =============================================================================

/// Response after saving a diagram
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveDiagramResponse {
    /// Identifier the diagram was stored under
    #[schema(example = "d1")]
    pub id: String,

    /// Status message
    #[schema(example = "Diagram saved successfully")]
    pub message: String,

    /// Seconds until the diagram expires, or null when it never expires
    #[schema(example = 2592000)]
    pub expires_in: Option<u64>,
}

/// Response after deleting a diagram
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteDiagramResponse {
    /// Status message
    #[schema(example = "Diagram deleted successfully")]
    pub message: String,
}

/// Response for the TTL inspection endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagramTtlResponse {
    /// Identifier of the inspected diagram
    #[schema(example = "d1")]
    pub id: String,

    /// Remaining seconds, or -1 when the diagram never expires
    #[schema(example = 2591998)]
    pub ttl: i64,

    /// Absolute expiry timestamp, or null when the diagram never expires
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Response for the liveness endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always "ok" while the process is serving
    #[schema(example = "ok")]
    pub status: String,

    /// Whether the backing key-value store currently answers
    pub store_connected: bool,
}
