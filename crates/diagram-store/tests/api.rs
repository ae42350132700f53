//! Handler-level tests driving the real router against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use diagram_store::handlers::{configure_routes, AppState};
use diagram_store::{DiagramService, MemoryDiagramStore};

fn test_app(ttl_seconds: u64) -> Router {
    let store = Arc::new(MemoryDiagramStore::new());
    let diagram_service = Arc::new(DiagramService::new(store, ttl_seconds));

    configure_routes().with_state(Arc::new(AppState { diagram_service }))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_save_fetch_delete_lifecycle() {
    let app = test_app(0);

    // Save
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/diagrams",
            json!({"id": "d1", "data": {"tables": []}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], "d1");
    assert_eq!(body["expiresIn"], Value::Null);
    assert_eq!(body["message"], "Diagram saved successfully");

    // Fetch returns the document unchanged
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/diagrams/d1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({"tables": []}));

    // Delete
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/diagrams/d1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Diagram deleted successfully");

    // Fetch after delete
    let response = app
        .clone()
        .oneshot(empty_request("GET", "/diagrams/d1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Delete again
    let response = app
        .oneshot(empty_request("DELETE", "/diagrams/d1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_reports_configured_ttl() {
    let app = test_app(2_592_000);

    let response = app
        .oneshot(json_request(
            "POST",
            "/diagrams",
            json!({"id": "d1", "data": {"tables": []}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["expiresIn"], json!(2_592_000));
}

#[tokio::test]
async fn test_save_overwrites_previous_document() {
    let app = test_app(0);

    for version in ["A", "B"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/diagrams",
                json!({"id": "d1", "data": {"version": version}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(empty_request("GET", "/diagrams/d1"))
        .await
        .unwrap();
    assert_eq!(response_json(response).await, json!({"version": "B"}));
}

#[tokio::test]
async fn test_save_without_id_is_bad_request() {
    let app = test_app(0);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/diagrams",
            json!({"data": {"tables": []}}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["title"], "Invalid Input");
}

#[tokio::test]
async fn test_save_without_data_is_bad_request_and_writes_nothing() {
    let app = test_app(0);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/diagrams", json!({"id": "d1"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Null data counts as missing.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/diagrams",
            json!({"id": "d1", "data": null}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // No partial write happened.
    let response = app
        .oneshot(empty_request("GET", "/diagrams/d1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ttl_endpoint_with_expiration_disabled() {
    let app = test_app(0);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/diagrams",
            json!({"id": "d1", "data": {"tables": []}}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/diagrams/d1/ttl"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["id"], "d1");
    assert_eq!(body["ttl"], json!(-1));
    assert_eq!(body["expiresAt"], Value::Null);

    let response = app
        .oneshot(empty_request("GET", "/diagrams/absent/ttl"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ttl_endpoint_with_expiration_enabled() {
    let app = test_app(3600);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/diagrams",
            json!({"id": "d1", "data": {"tables": []}}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(empty_request("GET", "/diagrams/d1/ttl"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;

    let ttl = body["ttl"].as_i64().unwrap();
    assert!(ttl > 0 && ttl <= 3600);
    assert!(body["expiresAt"].is_string());
}

#[tokio::test]
async fn test_health_reports_store_connectivity() {
    let app = test_app(0);

    let response = app
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storeConnected"], json!(true));
}

#[tokio::test]
async fn test_not_found_body_is_problem_json() {
    let app = test_app(0);

    let response = app
        .oneshot(empty_request("GET", "/diagrams/absent"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/problem+json")
    );
    let body = response_json(response).await;
    assert_eq!(body["title"], "Diagram Not Found");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app(0);

    let response = app
        .oneshot(empty_request("GET", "/api-docs/openapi.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["paths"]["/diagrams"].is_object());
    assert!(body["paths"]["/diagrams/{id}/ttl"].is_object());
}
