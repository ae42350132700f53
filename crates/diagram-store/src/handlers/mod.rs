//! HTTP handlers for diagram operations

mod handler;
mod types;

pub use handler::*;
pub use types::*;
