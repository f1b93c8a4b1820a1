//! Repository tests for job cards and their status history.

mod common;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use workshop_core::job_card::{plan_transition, Priority, VehicleType, NOTE_JOB_CREATED};
use workshop_core::job_status::{JobStatus, ReversionPolicy};
use workshop_core::roles::Role;
use workshop_db::models::job_card::JobCardFilter;
use workshop_db::repositories::JobCardRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_starts_new_with_one_history_entry(pool: PgPool) {
    let advisor = common::user(&pool, "Advisor", Role::Advisor).await;
    let tech = common::user(&pool, "Tech", Role::Technician).await;

    let card = common::job(&pool, advisor.id, Some(tech.id)).await;
    assert_eq!(card.status, "NEW");
    assert_eq!(card.priority, "MEDIUM");
    assert_eq!(card.vehicle_type, "2-wheeler");
    assert!(card.started_at.is_none());

    let history = JobCardRepo::history(&pool, card.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, "NEW");
    assert_eq!(history[0].notes, NOTE_JOB_CREATED);
    assert_eq!(history[0].changed_by_name.as_deref(), Some("Advisor"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_change_updates_card_and_appends_history(pool: PgPool) {
    let advisor = common::user(&pool, "Advisor", Role::Advisor).await;
    let tech = common::user(&pool, "Tech", Role::Technician).await;
    let card = common::job(&pool, advisor.id, Some(tech.id)).await;

    let mut tx = pool.begin().await.unwrap();
    let locked = JobCardRepo::lock_for_update(&mut tx, card.id)
        .await
        .unwrap()
        .unwrap();
    let plan = plan_transition(
        locked.status().unwrap(),
        locked.time_tracking(),
        JobStatus::InProgress,
        None,
        Utc::now(),
        ReversionPolicy::Forbid,
    )
    .unwrap();
    let updated = JobCardRepo::apply_status_change(&mut tx, card.id, &plan, tech.id)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(updated.status, "IN_PROGRESS");
    assert!(updated.started_at.is_some());

    let history = JobCardRepo::history(&pool, card.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].status, "IN_PROGRESS");
    assert_eq!(history[1].notes, "Status changed from NEW to IN_PROGRESS");
    assert_eq!(history[1].changed_by, tech.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rolled_back_change_leaves_no_trace(pool: PgPool) {
    let advisor = common::user(&pool, "Advisor", Role::Advisor).await;
    let card = common::job(&pool, advisor.id, None).await;

    let mut tx = pool.begin().await.unwrap();
    let plan = plan_transition(
        JobStatus::New,
        card.time_tracking(),
        JobStatus::Done,
        Some("closing"),
        Utc::now(),
        ReversionPolicy::Forbid,
    )
    .unwrap();
    JobCardRepo::apply_status_change(&mut tx, card.id, &plan, advisor.id)
        .await
        .unwrap();
    tx.rollback().await.unwrap();

    let reloaded = JobCardRepo::find_by_id(&pool, card.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, "NEW");
    assert_eq!(JobCardRepo::history(&pool, card.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn critical_mark_escalates_and_keeps_status(pool: PgPool) {
    let advisor = common::user(&pool, "Advisor", Role::Advisor).await;
    let tech = common::user(&pool, "Tech", Role::Technician).await;
    let card = common::job(&pool, advisor.id, Some(tech.id)).await;

    let mut tx = pool.begin().await.unwrap();
    let updated = JobCardRepo::mark_critical(
        &mut tx,
        card.id,
        "Cracked frame",
        Priority::Urgent,
        JobStatus::New,
        tech.id,
        "Marked as CRITICAL: Cracked frame",
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    assert!(updated.is_critical);
    assert_eq!(updated.critical_reason.as_deref(), Some("Cracked frame"));
    assert_eq!(updated.priority, "URGENT");
    assert_eq!(updated.status, "NEW");

    let history = JobCardRepo::history(&pool, card.id).await.unwrap();
    assert_eq!(history.last().unwrap().notes, "Marked as CRITICAL: Cracked frame");
    assert_eq!(history.last().unwrap().status, "NEW");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_applies_filters(pool: PgPool) {
    let advisor = common::user(&pool, "Advisor", Role::Advisor).await;
    let tech = common::user(&pool, "Tech", Role::Technician).await;
    let first = common::job(&pool, advisor.id, Some(tech.id)).await;

    let mut four = common::new_job(None);
    four.vehicle_type = VehicleType::FourWheeler;
    four.vehicle_model = "Swift".to_string();
    four.vehicle_number = "MH12XY9999".to_string();
    four.customer_name = "Ravi Kumar".to_string();
    let second = JobCardRepo::create(&pool, &four, advisor.id).await.unwrap();

    let all = JobCardRepo::list(&pool, &JobCardFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second.id, "newest first");

    let by_search = JobCardRepo::list(
        &pool,
        &JobCardFilter {
            search: Some("swi".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].id, second.id);

    let by_tech = JobCardRepo::list(
        &pool,
        &JobCardFilter {
            technician_id: Some(tech.id),
            vehicle_type: Some(VehicleType::TwoWheeler),
            status: Some(JobStatus::New),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_tech.len(), 1);
    assert_eq!(by_tech[0].id, first.id);

    let critical = JobCardRepo::list(
        &pool,
        &JobCardFilter {
            critical_only: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(critical.is_empty());

    let future = JobCardRepo::list(
        &pool,
        &JobCardFilter {
            created_from: Some(Utc::now() + Duration::hours(1)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(future.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn technician_jobs_are_ordered_by_urgency(pool: PgPool) {
    let advisor = common::user(&pool, "Advisor", Role::Advisor).await;
    let tech = common::user(&pool, "Tech", Role::Technician).await;

    let mut low = common::new_job(Some(tech.id));
    low.priority = Some(Priority::Low);
    let low = JobCardRepo::create(&pool, &low, advisor.id).await.unwrap();

    let mut urgent = common::new_job(Some(tech.id));
    urgent.priority = Some(Priority::Urgent);
    let urgent = JobCardRepo::create(&pool, &urgent, advisor.id).await.unwrap();

    let medium = common::job(&pool, advisor.id, Some(tech.id)).await;
    common::job(&pool, advisor.id, None).await;

    let mine = JobCardRepo::list_for_technician(&pool, tech.id).await.unwrap();
    let ids: Vec<_> = mine.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![urgent.id, medium.id, low.id]);
}
