//! HTTP-level integration tests for registration, login and `/auth/me`.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get, get_auth, post_json, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;
use workshop_core::roles::Role;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_returns_token_and_profile(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "Meera",
        "email": "Meera@Workshop.test",
        "password": "long-enough-1",
        "role": "advisor",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert!(json["expiresIn"].is_number());
    assert_eq!(json["user"]["email"], "meera@workshop.test");
    assert_eq!(json["user"]["role"], "advisor");
    assert!(json["user"].get("passwordHash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "Meera",
        "email": "meera@workshop.test",
        "password": "short",
        "role": "advisor",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    create_user(&pool, "Ravi", Role::Technician).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "name": "Another Ravi",
        "email": "ravi@workshop.test",
        "password": "long-enough-1",
        "role": "technician",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, _) = create_user(&pool, "Kiran", Role::Cashier).await;
    let app = common::build_test_app(pool);

    let body = json!({ "email": "KIRAN@workshop.test", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "cashier");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_is_unauthorized(pool: PgPool) {
    create_user(&pool, "Kiran", Role::Cashier).await;
    let app = common::build_test_app(pool);

    let body = json!({ "email": "kiran@workshop.test", "password": "not-the-password" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_email_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "email": "ghost@workshop.test", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_returns_profile(pool: PgPool) {
    let (user, token) = create_user(&pool, "Anita", Role::Manager).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["name"], "Anita");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
