//! Error envelope and middleware behaviour shared by every endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get, get_auth, post_json, post_json_auth};
use serde_json::json;
use sqlx::PgPool;
use workshop_core::roles::Role;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_errors_use_message_and_code(pool: PgPool) {
    let (_, token) = create_user(&pool, "Advisor", Role::Advisor).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/jobcards/424242", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["message"], "Job card with id 424242 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/notifications", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid or expired token");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrong_role_is_forbidden(pool: PgPool) {
    let (_, token) = create_user(&pool, "Tech", Role::Technician).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/bills", &token, json!({ "jobCardId": 1 })).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_technician_assignment_is_not_found(pool: PgPool) {
    let (_, token) = create_user(&pool, "Advisor", Role::Advisor).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/jobcards",
        &token,
        json!({
            "customerName": "Asha Rao",
            "customerPhone": "9876543210",
            "vehicleType": "2-wheeler",
            "vehicleModel": "Activa",
            "vehicleNumber": "KA01AB1234",
            "technicianId": 777_777,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_database(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["dbHealthy"], true);
    assert_eq!(json["wsConnections"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_body_uses_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/register",
        json!({
            "name": "Mallory",
            "email": "mallory@workshop.test",
            "password": "workshop-pass-123",
            "role": "admin",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_socket_upgrade_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/ws").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Missing token parameter");

    let response = get(app, "/api/ws?token=not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Invalid or expired token");
}
