//! Shared harness for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use workshop_api::auth::jwt::{generate_access_token, JwtConfig};
use workshop_api::auth::password::hash_password;
use workshop_api::config::ServerConfig;
use workshop_api::notifications::NotificationDispatcher;
use workshop_api::router::build_app_router;
use workshop_api::state::AppState;
use workshop_api::ws::WsManager;
use workshop_core::job_status::ReversionPolicy;
use workshop_core::roles::Role;
use workshop_db::models::user::{CreateUser, User};
use workshop_db::repositories::{InventoryRepo, UserRepo};
use workshop_events::EventBus;

/// Password given to every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "workshop-pass-123";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hs256".to_string(),
            expiry_hours: 1,
        },
        reversion_policy: ReversionPolicy::Forbid,
    }
}

/// Application state wired exactly like `main.rs`, minus the background
/// tasks.
pub fn test_state(pool: PgPool, config: ServerConfig) -> AppState {
    let event_bus = Arc::new(EventBus::default());
    AppState {
        pool: pool.clone(),
        config: Arc::new(config),
        ws_manager: Arc::new(WsManager::new()),
        notifier: NotificationDispatcher::new(pool.clone(), event_bus),
        catalog: Arc::new(InventoryRepo::new(pool)),
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = test_state(pool, config.clone());
    build_app_router(state, &config)
}

/// Insert a user with [`TEST_PASSWORD`] and mint a bearer token for them.
pub async fn create_user(pool: &PgPool, name: &str, role: Role) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{}@workshop.test", name.to_lowercase()),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role,
        },
    )
    .await
    .unwrap();
    let token = generate_access_token(user.id, role, &test_config().jwt).unwrap();
    (user, token)
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}
