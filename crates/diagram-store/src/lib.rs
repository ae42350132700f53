//! diagram-store: persistence service for sharable diagram documents
//!
//! Provides a Redis-backed store for opaque JSON diagrams with a
//! configurable expiration policy, exposed over a small HTTP API.

pub mod error;
pub mod handlers;
pub mod services;
pub mod store;

pub use error::DiagramStoreError;
pub use services::DiagramService;
pub use store::{DiagramStore, KeyTtl, MemoryDiagramStore, RedisDiagramStore};
