//! HTTP handlers for diagram operations

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use diagram_store_core::problemdetails::Problem;
use serde_json::Value;
use utoipa::OpenApi;

use super::types::*;
use crate::error::DiagramStoreError;

/// OpenAPI documentation for diagram endpoints
#[derive(OpenApi)]
#[openapi(
    paths(save_diagram, fetch_diagram, delete_diagram, get_diagram_ttl, health),
    components(schemas(
        SaveDiagramRequest,
        SaveDiagramResponse,
        DeleteDiagramResponse,
        DiagramTtlResponse,
        HealthResponse,
        diagram_store_core::ProblemDetails,
    )),
    tags(
        (name = "Diagrams", description = "Diagram persistence operations"),
        (name = "Health", description = "Service liveness")
    )
)]
pub struct DiagramApiDoc;

/// Configure diagram routes
pub fn configure_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/diagrams", post(save_diagram))
        .route("/diagrams/{id}", get(fetch_diagram).delete(delete_diagram))
        .route("/diagrams/{id}/ttl", get(get_diagram_ttl))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
}

/// Save or overwrite a diagram
#[utoipa::path(
    tag = "Diagrams",
    post,
    path = "/diagrams",
    request_body = SaveDiagramRequest,
    responses(
        (status = 200, description = "Diagram saved", body = SaveDiagramResponse),
        (status = 400, description = "Missing id or data", body = diagram_store_core::ProblemDetails),
        (status = 500, description = "Store fault", body = diagram_store_core::ProblemDetails)
    )
)]
pub async fn save_diagram(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveDiagramRequest>,
) -> Result<impl IntoResponse, Problem> {
    let (id, data) = match (request.id, request.data) {
        (Some(id), Some(data)) => (id, data),
        _ => {
            return Err(DiagramStoreError::InvalidInput(
                "Missing required fields: id and data".to_string(),
            )
            .into())
        }
    };

    let saved = state.diagram_service.save(&id, &data).await?;

    Ok(Json(SaveDiagramResponse {
        id: saved.id,
        message: "Diagram saved successfully".to_string(),
        expires_in: saved.expires_in,
    }))
}

/// Fetch a diagram by id
#[utoipa::path(
    tag = "Diagrams",
    get,
    path = "/diagrams/{id}",
    params(("id" = String, Path, description = "Diagram identifier")),
    responses(
        (status = 200, description = "The stored diagram document", body = Value),
        (status = 404, description = "Diagram absent or expired", body = diagram_store_core::ProblemDetails),
        (status = 500, description = "Store fault", body = diagram_store_core::ProblemDetails)
    )
)]
pub async fn fetch_diagram(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Problem> {
    let data = state.diagram_service.fetch(&id).await?;

    Ok(Json(data))
}

/// Delete a diagram by id
#[utoipa::path(
    tag = "Diagrams",
    delete,
    path = "/diagrams/{id}",
    params(("id" = String, Path, description = "Diagram identifier")),
    responses(
        (status = 200, description = "Diagram deleted", body = DeleteDiagramResponse),
        (status = 404, description = "Diagram absent", body = diagram_store_core::ProblemDetails),
        (status = 500, description = "Store fault", body = diagram_store_core::ProblemDetails)
    )
)]
pub async fn delete_diagram(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Problem> {
    state.diagram_service.delete(&id).await?;

    Ok(Json(DeleteDiagramResponse {
        message: "Diagram deleted successfully".to_string(),
    }))
}

/// Inspect the remaining lifetime of a diagram
#[utoipa::path(
    tag = "Diagrams",
    get,
    path = "/diagrams/{id}/ttl",
    params(("id" = String, Path, description = "Diagram identifier")),
    responses(
        (status = 200, description = "Remaining lifetime", body = DiagramTtlResponse),
        (status = 404, description = "Diagram absent", body = diagram_store_core::ProblemDetails),
        (status = 500, description = "Store fault", body = diagram_store_core::ProblemDetails)
    )
)]
pub async fn get_diagram_ttl(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Problem> {
    let ttl = state.diagram_service.get_ttl(&id).await?;

    Ok(Json(DiagramTtlResponse {
        id,
        ttl: ttl.ttl,
        expires_at: ttl.expires_at,
    }))
}

/// Liveness probe reporting store connectivity
#[utoipa::path(
    tag = "Health",
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store_connected = state.diagram_service.store_connected().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        store_connected,
    })
}

/// Serve the generated OpenAPI document
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(<DiagramApiDoc as OpenApi>::openapi())
}
