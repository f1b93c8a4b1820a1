//! HTTP-level integration tests for the manager dashboard.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, post_json_auth, put_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;
use workshop_core::roles::Role;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_counts_jobs_and_paid_revenue(pool: PgPool) {
    let (_, advisor) = create_user(&pool, "Advisor", Role::Advisor).await;
    let (_, cashier) = create_user(&pool, "Cashier", Role::Cashier).await;
    let (_, manager) = create_user(&pool, "Boss", Role::Manager).await;
    let app = common::build_test_app(pool);

    let mut job_ids = Vec::new();
    for number in ["KA01AA0001", "KA01AA0002", "KA01AA0003"] {
        let response = post_json_auth(
            app.clone(),
            "/api/jobcards",
            &advisor,
            json!({
                "customerName": "Customer",
                "customerPhone": "9000000000",
                "vehicleType": "2-wheeler",
                "vehicleModel": "Splendor",
                "vehicleNumber": number,
            }),
        )
        .await;
        job_ids.push(body_json(response).await["data"]["id"].as_i64().unwrap());
    }

    put_json_auth(
        app.clone(),
        &format!("/api/jobcards/{}/status", job_ids[0]),
        &manager,
        json!({ "status": "DONE" }),
    )
    .await;

    // One paid bill, one pending bill.
    let mut bill_ids = Vec::new();
    for (job_id, price) in [(job_ids[0], 300.0), (job_ids[1], 120.0)] {
        let response = post_json_auth(
            app.clone(),
            "/api/bills",
            &cashier,
            json!({ "jobCardId": job_id, "items": [{ "name": "Service", "price": price }] }),
        )
        .await;
        bill_ids.push(body_json(response).await["data"]["id"].as_i64().unwrap());
    }
    put_auth(app.clone(), &format!("/api/bills/{}/pay", bill_ids[0]), &cashier).await;

    let response = get_auth(app, "/api/manager/dashboard", &manager).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["totalJobs"], 3);
    assert_eq!(json["data"]["completedJobs"], 1);
    assert_eq!(json["data"]["pendingJobs"], 2);
    assert_eq!(json["data"]["totalRevenue"], 300.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_dashboard_is_zeroed(pool: PgPool) {
    let (_, manager) = create_user(&pool, "Boss", Role::Manager).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/manager/dashboard", &manager).await).await;
    assert_eq!(json["data"]["totalJobs"], 0);
    assert_eq!(json["data"]["totalRevenue"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_technician_roster(pool: PgPool) {
    let (_, manager) = create_user(&pool, "Boss", Role::Manager).await;
    create_user(&pool, "Ravi", Role::Technician).await;
    create_user(&pool, "Advisor", Role::Advisor).await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/manager/technicians", &manager).await).await;
    let technicians = json["data"].as_array().unwrap();
    assert_eq!(technicians.len(), 1);
    assert_eq!(technicians[0]["name"], "Ravi");
    assert!(technicians[0].get("email").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_is_manager_only(pool: PgPool) {
    let (_, advisor) = create_user(&pool, "Advisor", Role::Advisor).await;
    let app = common::build_test_app(pool);

    for uri in ["/api/manager/dashboard", "/api/manager/jobs"] {
        let response = get_auth(app.clone(), uri, &advisor).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_advisor_can_list_technicians(pool: PgPool) {
    let (_, advisor) = create_user(&pool, "Advisor", Role::Advisor).await;
    let (tech, _) = create_user(&pool, "Ravi", Role::Technician).await;
    let (_, cashier) = create_user(&pool, "Cashier", Role::Cashier).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/manager/technicians", &advisor).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["id"], tech.id);

    let response = get_auth(app, "/api/manager/technicians", &cashier).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
