//! Error types for the diagram store service

use axum::http::StatusCode;
use diagram_store_core::problemdetails::{self, Problem};
use thiserror::Error;

/// Errors that can occur in the diagram store service
#[derive(Error, Debug)]
pub enum DiagramStoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Diagram not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<DiagramStoreError> for Problem {
    fn from(error: DiagramStoreError) -> Self {
        match error {
            // Store faults carry a generic detail; internals stay in the logs.
            DiagramStoreError::Redis(e) => {
                tracing::error!("Store operation failed: {}", e);
                problemdetails::new(StatusCode::INTERNAL_SERVER_ERROR)
                    .with_title("Store Error")
                    .with_detail("The diagram store is currently unavailable")
            }

            DiagramStoreError::ConnectionFailed(msg) => {
                tracing::error!("Store connection failed: {}", msg);
                problemdetails::new(StatusCode::INTERNAL_SERVER_ERROR)
                    .with_title("Store Error")
                    .with_detail("The diagram store is currently unavailable")
            }

            DiagramStoreError::Serialization(msg) => {
                tracing::error!("Serialization failed: {}", msg);
                problemdetails::new(StatusCode::INTERNAL_SERVER_ERROR)
                    .with_title("Serialization Error")
                    .with_detail("The diagram could not be serialized")
            }

            DiagramStoreError::NotFound(id) => problemdetails::new(StatusCode::NOT_FOUND)
                .with_title("Diagram Not Found")
                .with_detail(format!("Diagram '{}' was not found", id)),

            DiagramStoreError::InvalidInput(msg) => problemdetails::new(StatusCode::BAD_REQUEST)
                .with_title("Invalid Input")
                .with_detail(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let problem: Problem = DiagramStoreError::NotFound("d1".to_string()).into();
        assert_eq!(problem.status_code, StatusCode::NOT_FOUND);
        assert_eq!(
            problem.body.get("detail").and_then(|v| v.as_str()),
            Some("Diagram 'd1' was not found")
        );
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let problem: Problem =
            DiagramStoreError::InvalidInput("Missing required fields: id and data".to_string())
                .into();
        assert_eq!(problem.status_code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_faults_do_not_leak_details() {
        let problem: Problem =
            DiagramStoreError::ConnectionFailed("ECONNREFUSED 10.0.0.3:6379".to_string()).into();
        assert_eq!(problem.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        let detail = problem.body.get("detail").and_then(|v| v.as_str()).unwrap();
        assert!(!detail.contains("10.0.0.3"));
    }
}
