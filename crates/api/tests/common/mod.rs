//! Shared helpers for the HTTP integration tests.
//!
//! Every test gets a fresh [`MemoryStore`] behind the production router, so
//! the middleware stack and route table are exactly what the binary serves.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use tugas_api::auth::jwt::JwtConfig;
use tugas_api::config::ServerConfig;
use tugas_api::router::build_app_router;
use tugas_api::state::AppState;
use tugas_db::MemoryStore;

/// Password used by [`register`] for every test account.
pub const PASSWORD: &str = "rahasia123";

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over an empty in-memory store.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// A registered and logged-in test account.
pub struct Account {
    pub id: String,
    pub token: String,
}

/// Register a user through the API and return the created user JSON.
pub async fn register(app: Router, name: &str, role: &str, wilayah: Option<&str>) -> Value {
    let mut body = json!({
        "name": name,
        "email": format!("{name}@test.com"),
        "password": PASSWORD,
        "role": role,
    });
    if let Some(wilayah) = wilayah {
        body["wilayah"] = json!(wilayah);
    }

    let response = post_json(app, "/api/register", body).await;
    assert_eq!(response.status(), 201, "registration of {name} should succeed");
    body_json(response).await["user"].clone()
}

/// Log in with the shared test password and return the token.
pub async fn login(app: Router, email: &str) -> String {
    let response = post_json(
        app,
        "/api/login",
        json!({ "email": email, "password": PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), 200, "login of {email} should succeed");
    body_json(response).await["token"]
        .as_str()
        .expect("token should be a string")
        .to_string()
}

/// Register and log in.
pub async fn account(app: &Router, name: &str, role: &str, wilayah: Option<&str>) -> Account {
    let user = register(app.clone(), name, role, wilayah).await;
    let token = login(app.clone(), &format!("{name}@test.com")).await;
    Account {
        id: user["id"].as_str().expect("id should be a string").to_string(),
        token,
    }
}

/// Create a tugas as `creator` assigned to `assignee_id`; returns the tugas JSON.
pub async fn create_tugas(app: Router, creator: &Account, assignee_id: &str, judul: &str) -> Value {
    let response = post_json_auth(
        app,
        "/api/tugas",
        json!({
            "judul": judul,
            "konsultan_id": assignee_id,
            "deadline": "2025-01-01",
        }),
        &creator.token,
    )
    .await;
    assert_eq!(response.status(), 201, "tugas creation should succeed");
    body_json(response).await
}
