use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use lpforge_api_server::router;
use lpforge_model_store::{ModelStore, StoreConfig};
use serde_json::{Value, json};
use tempfile::tempdir;
use tower::ServiceExt;

async fn app(base: &Path, failpoints: &[&str]) -> Router {
    let config = StoreConfig::default_sqlite(base.join("model.sqlite").to_string_lossy())
        .with_failpoints(failpoints.iter().copied());
    let store = ModelStore::connect(&config, base).await.expect("store");
    router(store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

#[tokio::test]
async fn set_scenario_tracks_length_through_lifecycle() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &[]).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sets",
        Some(json!({ "set_name": "Suppliers", "items": ["A", "B", "C"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["length"], json!(3));
    assert_eq!(body["message"], json!("Set created successfully"));
    let id = body["data"]["id"].as_i64().expect("id");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/sets/{id}"),
        Some(json!({ "set_name": "Suppliers", "items": ["A", "B"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["length"], json!(2));
    assert_eq!(body["data"]["items"], json!(["A", "B"]));
    assert_eq!(body["message"], json!("Set updated successfully"));

    let (status, body) = send(&app, Method::DELETE, &format!("/api/sets/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(id));
    assert_eq!(body["message"], json!("Set deleted successfully"));

    let (status, body) = send(&app, Method::GET, &format!("/api/sets/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Set not found" }));
}

#[tokio::test]
async fn constraint_without_parameters_is_created_with_empty_lists() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &[]).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/constraints",
        Some(json!({ "name": "Cap", "sign": "le", "rhs": 10, "format": "x<=10" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["parameters_needed"], json!([]));
    assert_eq!(body["data"]["decision_needed"], json!([]));
    assert_eq!(body["data"]["sign"], json!("le"));
    assert_eq!(body["data"]["rhs"], json!(10.0));
}

#[tokio::test]
async fn missing_required_field_is_400_and_persists_nothing() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &[]).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/parameters",
        Some(json!({ "name": "cost", "relations": "Plants" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Parameter value is required"));

    let (status, body) = send(&app, Method::GET, "/api/parameters", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": [] }));
}

#[tokio::test]
async fn zero_values_are_accepted() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &[]).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/parameters",
        Some(json!({ "name": "fixed", "value": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["value"], json!(0.0));
}

#[tokio::test]
async fn malformed_json_is_a_validation_failure() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &[]).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/sets")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"set_name\": "))
        .expect("request");
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(
        body["error"]
            .as_str()
            .expect("error")
            .starts_with("Invalid request body")
    );
}

#[tokio::test]
async fn non_integer_ids_are_not_found() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &[]).await;
    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/api/decision_variables/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("Decision variable not found"));
    }
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/objective_functions/9",
        Some(json!({ "name": "cost", "format": "min c*x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn storage_failures_are_500_with_details() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &["before_insert", "before_select"]).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sets",
        Some(json!({ "set_name": "Suppliers" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Error creating set"));
    assert_eq!(body["details"], json!("failpoint before_insert"));

    let (status, body) = send(&app, Method::GET, "/api/sets", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Error fetching sets"));
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &[]).await;
    for name in ["x", "y", "z"] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/decision_variables",
            Some(json!({ "name": name, "relations": "I,J" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, body) = send(&app, Method::GET, "/api/decision_variables", None).await;
    assert_eq!(status, StatusCode::OK);
    let names = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|entry| entry["name"].as_str().expect("name").to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, ["x", "y", "z"]);
    assert_eq!(body["data"][0]["length"], json!(2));
    assert_eq!(body["data"][0]["value"], Value::Null);
}

#[tokio::test]
async fn health_reports_backend() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &[]).await;
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "data": { "ok": true, "backend": "sqlite" } })
    );
}

#[tokio::test]
async fn unknown_routes_use_error_envelope() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &[]).await;
    let (status, body) = send(&app, Method::GET, "/api/widgets", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let dir = tempdir().expect("tempdir");
    let app = app(dir.path(), &[]).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/sets")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );

    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/constraints")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(preflight).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS)
    );
}
