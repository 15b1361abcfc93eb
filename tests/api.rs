//! HTTP-level tests: the real router over a fresh in-memory store per test.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use microservice_api::{app, AppState, MemoryGateway};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(Arc::new(MemoryGateway::default())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_user(app: &Router, name: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/users/",
        Some(json!({ "name": name, "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

async fn create_product(app: &Router, name: &str, price: f64) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/products/",
        Some(json!({ "name": name, "description": "d", "price": price })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn health_and_readiness_are_static() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "healthy", "service": "microservice-api", "version": "1.0.0" })
    );

    let (status, body) = send(&app, Method::GET, "/readiness", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
    assert_eq!(body["message"], "API is ready to receive requests");
}

#[tokio::test]
async fn root_describes_the_service() {
    let (status, body) = send(&test_app(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to Microservice API");
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["docs"], "/docs");
    assert_eq!(body["database"], "in-memory");
}

#[tokio::test]
async fn docs_serve_the_openapi_document() {
    let (status, body) = send(&test_app(), Method::GET, "/docs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    assert!(body["paths"]["/api/v1/users/{id}"].is_object());
}

#[tokio::test]
async fn user_lifecycle_end_to_end() {
    let app = test_app();
    let created = create_user(&app, "A", "a@x.com").await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "A");
    assert_eq!(created["email"], "a@x.com");
    assert_eq!(created["active"], true);
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_string());

    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users/",
        Some(json!({ "name": "Other name", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Email already registered" }));

    let (status, body) = send(&app, Method::DELETE, &format!("/api/v1/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, &format!("/api/v1/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "User not found" }));
}

#[tokio::test]
async fn product_update_end_to_end() {
    let app = test_app();
    let created = create_product(&app, "Mouse", 10.0).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["in_stock"], true);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/products/{id}"),
        Some(json!({ "name": "Mouse", "description": "d", "price": 20.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 20.0);

    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["price"], 20.0);
    assert_eq!(fetched["created_at"], created["created_at"]);
}

#[tokio::test]
async fn non_positive_price_is_rejected_and_nothing_is_stored() {
    let app = test_app();
    for price in [0.0, -5.0] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/products/",
            Some(json!({ "name": "Free", "description": "d", "price": price })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "price must be greater than 0");
    }
    let (_, list) = send(&app, Method::GET, "/api/v1/products/", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn update_with_non_positive_price_is_rejected() {
    let app = test_app();
    let created = create_product(&app, "Mouse", 10.0).await;
    let id = created["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/products/{id}"),
        Some(json!({ "name": "Mouse", "description": "d", "price": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (_, fetched) = send(&app, Method::GET, &format!("/api/v1/products/{id}"), None).await;
    assert_eq!(fetched["price"], 10.0);
}

#[tokio::test]
async fn malformed_bodies_and_ids_are_validation_errors() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users/",
        Some(json!({ "name": "No email" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("email"));

    let (status, body) = send(&app, Method::GET, "/api/v1/products/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "id must be an integer");
}

#[tokio::test]
async fn unknown_ids_are_not_found_for_both_resources() {
    let app = test_app();
    create_user(&app, "A", "a@x.com").await;
    create_product(&app, "Mouse", 10.0).await;

    let user = json!({ "name": "B", "email": "b@x.com" });
    let product = json!({ "name": "P", "description": "d", "price": 1.0 });
    for (base, body, detail) in [
        ("/api/v1/users", user, "User not found"),
        ("/api/v1/products", product, "Product not found"),
    ] {
        let uri = format!("{base}/4242");
        for (method, payload) in [
            (Method::GET, None),
            (Method::PUT, Some(body.clone())),
            (Method::DELETE, None),
        ] {
            let (status, response) = send(&app, method.clone(), &uri, payload).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(response["detail"], detail);
        }
    }
}

#[tokio::test]
async fn ids_beyond_the_integer_column_are_not_found() {
    let app = test_app();
    let user = json!({ "name": "B", "email": "b@x.com" });
    let product = json!({ "name": "P", "description": "d", "price": 1.0 });
    for (base, body, detail) in [
        ("/api/v1/users", user, "User not found"),
        ("/api/v1/products", product, "Product not found"),
    ] {
        for id in ["3000000000", "-3000000000"] {
            let uri = format!("{base}/{id}");
            for (method, payload) in [
                (Method::GET, None),
                (Method::PUT, Some(body.clone())),
                (Method::DELETE, None),
            ] {
                let (status, response) = send(&app, method.clone(), &uri, payload).await;
                assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
                assert_eq!(response, json!({ "detail": detail }));
            }
        }
    }
}

#[tokio::test]
async fn list_tracks_creates_and_deletes() {
    let app = test_app();
    let a = create_user(&app, "A", "a@x.com").await;
    let b = create_user(&app, "B", "b@x.com").await;
    let c = create_user(&app, "C", "c@x.com").await;
    assert_ne!(a["id"], b["id"]);
    assert_ne!(b["id"], c["id"]);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/users/{}", b["id"]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, list) = send(&app, Method::GET, "/api/v1/users/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([a, c]));

    // Slash-less collection path is the same resource.
    let (_, same) = send(&app, Method::GET, "/api/v1/users", None).await;
    assert_eq!(same, list);
}

#[tokio::test]
async fn second_delete_is_not_found() {
    let app = test_app();
    let p = create_product(&app, "Mouse", 10.0).await;
    let uri = format!("/api/v1/products/{}", p["id"]);
    assert_eq!(send(&app, Method::DELETE, &uri, None).await.0, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, Method::DELETE, &uri, None).await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_update_replaces_name_and_email_but_not_active() {
    let app = test_app();
    let created = create_user(&app, "A", "a@x.com").await;
    let uri = format!("/api/v1/users/{}", created["id"]);
    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "Updated User", "email": "updated@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Updated User");
    assert_eq!(updated["email"], "updated@example.com");
    assert_eq!(updated["active"], true);
    assert_eq!(updated["updated_at"], created["updated_at"]);

    // The freed address can be registered again.
    create_user(&app, "New", "a@x.com").await;
}

#[tokio::test]
async fn updating_to_a_taken_email_is_rejected_by_the_store() {
    let app = test_app();
    create_user(&app, "A", "a@x.com").await;
    let b = create_user(&app, "B", "b@x.com").await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/users/{}", b["id"]),
        Some(json!({ "name": "B", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already registered");

    let (_, fetched) = send(&app, Method::GET, &format!("/api/v1/users/{}", b["id"]), None).await;
    assert_eq!(fetched["email"], "b@x.com");
}

#[tokio::test]
async fn cors_allows_local_origins_with_credentials() {
    let app = test_app();
    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/users/")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(preflight("http://localhost:3000")).await.unwrap();
    let headers = response.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    let response = app.oneshot(preflight("http://evil.example")).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
