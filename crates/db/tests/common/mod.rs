//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use sqlx::PgPool;
use workshop_core::job_card::VehicleType;
use workshop_core::roles::Role;
use workshop_core::types::DbId;
use workshop_db::models::job_card::{CreateJobCard, JobCard};
use workshop_db::models::user::{CreateUser, User};
use workshop_db::repositories::{JobCardRepo, UserRepo};

pub async fn user(pool: &PgPool, name: &str, role: Role) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{}@workshop.test", name.to_lowercase()),
            password_hash: "not-a-real-hash".to_string(),
            role,
        },
    )
    .await
    .unwrap()
}

pub fn new_job(technician_id: Option<DbId>) -> CreateJobCard {
    CreateJobCard {
        customer_name: "Asha Rao".to_string(),
        customer_phone: "9876543210".to_string(),
        vehicle_type: VehicleType::TwoWheeler,
        vehicle_model: "Activa".to_string(),
        vehicle_number: "KA01AB1234".to_string(),
        complaint: "Brakes squeal".to_string(),
        technician_id,
        priority: None,
        estimated_duration: Some(2.0),
    }
}

pub async fn job(pool: &PgPool, created_by: DbId, technician_id: Option<DbId>) -> JobCard {
    JobCardRepo::create(pool, &new_job(technician_id), created_by)
        .await
        .unwrap()
}
