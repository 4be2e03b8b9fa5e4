//! Router-level tests driving the full HTTP surface in-process.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use kosync::auth::PasswordHasher;
use kosync::server::{AppState, create_router};
use kosync::store::{SqliteStore, Store};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_router() -> Router {
    let store = SqliteStore::open_in_memory().expect("open store");
    store.initialize().expect("initialize store");
    let hasher = PasswordHasher::new("test-salt").expect("hasher");
    let state = AppState::new(Arc::new(store), hasher).expect("app state");
    create_router(Arc::new(state))
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    credentials: Option<(&str, &str)>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some((user, key)) = credentials {
        builder = builder.header("x-auth-user", user).header("x-auth-key", key);
    }

    let body = match body {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, headers, json)
}

async fn register(router: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(
        router,
        "POST",
        "/users/create",
        Some(json!({ "username": username, "password": password })),
        None,
    )
    .await;
    (status, body)
}

fn progress_body(document: &str, progress: &str, percentage: f64, device: &str, device_id: &str) -> Value {
    json!({
        "document": document,
        "progress": progress,
        "percentage": percentage,
        "device": device,
        "device_id": device_id,
    })
}

#[tokio::test]
async fn test_health_needs_no_auth() {
    let router = test_router();

    let (status, headers, body) = send(&router, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let router = test_router();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_landing_page() {
    let router = test_router();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let router = test_router();

    let (status, _, body) = send(&router, "GET", "/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_register_once_then_conflict() {
    let router = test_router();

    let (status, body) = register(&router, "alice", "secret123").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "status": "success" }));

    let (status, body) = register(&router, "alice", "different").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_exists");

    let (status, _) = register(&router, "bob", "secret123").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_validation() {
    let router = test_router();

    let (status, body) = register(&router, "", "secret123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");

    let (status, _, body) = send(
        &router,
        "POST",
        "/users/create",
        Some(json!({ "username": "alice" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: password");

    let request = Request::builder()
        .method("POST")
        .uri("/users/create")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_auth_failures_are_indistinguishable() {
    let router = test_router();
    register(&router, "alice", "secret123").await;

    let (status, _, body) = send(&router, "GET", "/users/auth", None, Some(("alice", "secret123"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "authenticated" }));

    let (_, _, wrong_password) =
        send(&router, "GET", "/users/auth", None, Some(("alice", "nope"))).await;
    let (_, _, unknown_user) =
        send(&router, "GET", "/users/auth", None, Some(("mallory", "secret123"))).await;
    let (status, _, missing) = send(&router, "GET", "/users/auth", None, None).await;
    let (_, _, empty) = send(&router, "GET", "/users/auth", None, Some(("", ""))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["error"], "unauthenticated");
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password, missing);
    assert_eq!(wrong_password, empty);
}

#[tokio::test]
async fn test_end_to_end_last_write_wins() {
    let router = test_router();
    let alice = Some(("alice", "secret123"));

    let (status, _) = register(&router, "alice", "secret123").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _, body) = send(
        &router,
        "PUT",
        "/syncs/progress",
        Some(progress_body("book1", "page42", 37.5, "kobo", "abc")),
        alice,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success" }));

    let (status, _, body) = send(&router, "GET", "/syncs/progress/book1", None, alice).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"], "page42");
    assert_eq!(body["percentage"], 37.5);
    assert_eq!(body["device"], "kobo");
    assert_eq!(body["device_id"], "abc");
    assert!(body["timestamp"].as_i64().unwrap() > 0);
    assert!(body.get("document").is_none());

    // Lower progress from another device still replaces the record
    send(
        &router,
        "PUT",
        "/syncs/progress",
        Some(progress_body("book1", "page7", 10.0, "phone", "xyz")),
        alice,
    )
    .await;

    let (_, _, body) = send(&router, "GET", "/syncs/progress/book1", None, alice).await;
    assert_eq!(body["progress"], "page7");
    assert_eq!(body["percentage"], 10.0);
    assert_eq!(body["device"], "phone");
    assert_eq!(body["device_id"], "xyz");
}

#[tokio::test]
async fn test_client_timestamp_is_ignored() {
    let router = test_router();
    let alice = Some(("alice", "secret123"));
    register(&router, "alice", "secret123").await;

    let mut body = progress_body("book1", "p", 1.0, "kobo", "abc");
    body["timestamp"] = json!(1);
    let before = chrono::Utc::now().timestamp();
    send(&router, "PUT", "/syncs/progress", Some(body), alice).await;

    let (_, _, body) = send(&router, "GET", "/syncs/progress/book1", None, alice).await;
    assert!(body["timestamp"].as_i64().unwrap() >= before);
}

#[tokio::test]
async fn test_progress_is_isolated_between_accounts() {
    let router = test_router();
    register(&router, "alice", "a-pass").await;
    register(&router, "bob", "b-pass").await;

    send(
        &router,
        "PUT",
        "/syncs/progress",
        Some(progress_body("shared-hash", "page99", 99.0, "kobo", "abc")),
        Some(("alice", "a-pass")),
    )
    .await;

    let (status, _, body) = send(
        &router,
        "GET",
        "/syncs/progress/shared-hash",
        None,
        Some(("bob", "b-pass")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_progress_requires_auth_and_fields() {
    let router = test_router();
    register(&router, "alice", "secret123").await;

    let (status, _, _) = send(
        &router,
        "PUT",
        "/syncs/progress",
        Some(progress_body("book1", "p", 1.0, "kobo", "abc")),
        Some(("alice", "wrong")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(&router, "GET", "/syncs/progress/book1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = send(
        &router,
        "PUT",
        "/syncs/progress",
        Some(json!({ "document": "book1", "progress": "p", "device": "kobo" })),
        Some(("alice", "secret123")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required fields: percentage, device_id");

    let (status, _, _) = send(
        &router,
        "GET",
        "/syncs/progress/never-written",
        None,
        Some(("alice", "secret123")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_updates_never_mix_fields() {
    let router = test_router();
    let alice = Some(("alice", "secret123"));
    register(&router, "alice", "secret123").await;

    let mut handles = Vec::new();
    for i in 0..4 {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            let body = progress_body(
                "book1",
                &format!("page{i}"),
                f64::from(i),
                &format!("device{i}"),
                &format!("id{i}"),
            );
            send(
                &router,
                "PUT",
                "/syncs/progress",
                Some(body),
                Some(("alice", "secret123")),
            )
            .await
            .0
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let (_, _, body) = send(&router, "GET", "/syncs/progress/book1", None, alice).await;
    let i = body["percentage"].as_f64().unwrap() as i64;
    assert_eq!(body["progress"], format!("page{i}"));
    assert_eq!(body["device"], format!("device{i}"));
    assert_eq!(body["device_id"], format!("id{i}"));
}
