//! Handlers for the `/jobcards` resource.
//!
//! Status changes, summaries and critical flags all run under a row lock
//! taken by [`JobCardRepo::lock_for_update`], so concurrent writers on the
//! same card serialize and each accepted change appends exactly one
//! history entry.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;
use workshop_core::error::CoreError;
use workshop_core::job_card::{
    critical_note, ensure_assigned_technician, ensure_can_update_status, plan_transition,
    resolve_critical, Priority, NOTE_SUMMARY_COMPLETED,
};
use workshop_core::job_status::JobStatus;
use workshop_core::notifications::{
    completed_message, critical_message, new_job_message, status_message, NotificationType,
    TITLE_CRITICAL_ISSUE, TITLE_JOB_COMPLETED, TITLE_NEW_JOB, TITLE_STATUS_UPDATED,
};
use workshop_core::roles::Role;
use workshop_core::types::DbId;
use workshop_db::models::job_card::{CreateJobCard, JobCard, JobCardDetail, JobCardFilter};
use workshop_db::models::notification::NewNotification;
use workshop_db::repositories::{JobCardRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{
    RequireAdvisor, RequireManagerOrAdvisor, RequireTechnician, RequireTechnicianOrManager,
};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /jobcards/{id}/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: JobStatus,
    pub notes: Option<String>,
}

/// Request body for `PUT /jobcards/{id}/summary`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummaryRequest {
    pub service_notes: Option<String>,
    pub recommendations: Option<String>,
    #[serde(default)]
    pub mark_as_done: bool,
}

/// Request body for `PUT /jobcards/{id}/critical`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkCriticalRequest {
    #[serde(default)]
    pub critical_reason: String,
    pub priority: Option<Priority>,
}

fn job_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Job card",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/jobcards
pub async fn create_job_card(
    RequireAdvisor(auth): RequireAdvisor,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateJobCard>,
) -> AppResult<(StatusCode, Json<DataResponse<JobCard>>)> {
    input.validate()?;

    if let Some(technician_id) = input.technician_id {
        let technician = UserRepo::find_by_id(&state.pool, technician_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Technician",
                id: technician_id,
            })?;
        if technician.role()? != Role::Technician {
            return Err(CoreError::validation("Assigned user is not a technician").into());
        }
    }

    let card = JobCardRepo::create(&state.pool, &input, auth.user_id).await?;
    tracing::info!(
        job_card_id = card.id,
        created_by = auth.user_id,
        technician_id = ?card.technician_id,
        "Job card created"
    );

    if let Some(technician_id) = card.technician_id {
        state
            .notifier
            .dispatch(NewNotification {
                user_id: technician_id,
                notification_type: NotificationType::NewJob,
                title: TITLE_NEW_JOB.to_string(),
                message: new_job_message(&card.vehicle_number, &card.vehicle_model),
                job_card_id: Some(card.id),
                priority: card.priority()?,
            })
            .await;
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: card })))
}

/// GET /api/jobcards
///
/// Every query parameter of [`JobCardFilter`] is optional.
pub async fn list_job_cards(
    RequireManagerOrAdvisor(_auth): RequireManagerOrAdvisor,
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<JobCardFilter>,
) -> AppResult<Json<DataResponse<Vec<JobCard>>>> {
    let cards = JobCardRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/jobcards/my
pub async fn my_job_cards(
    RequireTechnician(auth): RequireTechnician,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<JobCard>>>> {
    let cards = JobCardRepo::list_for_technician(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/jobcards/{id}
pub async fn get_job_card(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<JobCardDetail>>> {
    let job_card = JobCardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| job_not_found(id))?;
    let status_history = JobCardRepo::history(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: JobCardDetail {
            job_card,
            status_history,
        },
    }))
}

/// PUT /api/jobcards/{id}/status
pub async fn update_status(
    RequireTechnicianOrManager(auth): RequireTechnicianOrManager,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<JobCard>>> {
    let mut tx = state.pool.begin().await?;
    let current = JobCardRepo::lock_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| job_not_found(id))?;

    ensure_can_update_status(auth.user_id, auth.role, current.technician_id)?;

    let plan = plan_transition(
        current.status()?,
        current.time_tracking(),
        input.status,
        input.notes.as_deref(),
        Utc::now(),
        state.config.reversion_policy,
    )?;
    let updated = JobCardRepo::apply_status_change(&mut tx, id, &plan, auth.user_id).await?;
    tx.commit().await?;

    tracing::info!(
        job_card_id = id,
        from = %plan.from,
        to = %plan.to,
        changed_by = auth.user_id,
        "Job card status changed"
    );

    if updated.created_by != auth.user_id {
        state
            .notifier
            .dispatch(NewNotification {
                user_id: updated.created_by,
                notification_type: NotificationType::StatusChange,
                title: TITLE_STATUS_UPDATED.to_string(),
                message: status_message(&updated.vehicle_number, plan.to.as_str()),
                job_card_id: Some(id),
                priority: Priority::Medium,
            })
            .await;
    }

    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/jobcards/{id}/summary
///
/// With `mark_as_done` the card also moves to `DONE` in the same
/// transaction, unless it is already there.
pub async fn update_summary(
    RequireTechnician(auth): RequireTechnician,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ServiceSummaryRequest>,
) -> AppResult<Json<DataResponse<JobCard>>> {
    let mut tx = state.pool.begin().await?;
    let current = JobCardRepo::lock_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| job_not_found(id))?;

    ensure_assigned_technician(auth.user_id, current.technician_id)?;

    let mut updated = JobCardRepo::update_summary(
        &mut tx,
        id,
        input.service_notes.as_deref(),
        input.recommendations.as_deref(),
    )
    .await?;

    let status = current.status()?;
    let completed = input.mark_as_done && status != JobStatus::Done;
    if completed {
        let plan = plan_transition(
            status,
            current.time_tracking(),
            JobStatus::Done,
            Some(NOTE_SUMMARY_COMPLETED),
            Utc::now(),
            state.config.reversion_policy,
        )?;
        updated = JobCardRepo::apply_status_change(&mut tx, id, &plan, auth.user_id).await?;
    }
    tx.commit().await?;

    tracing::info!(job_card_id = id, completed, "Service summary saved");

    if completed && updated.created_by != auth.user_id {
        state
            .notifier
            .dispatch(NewNotification {
                user_id: updated.created_by,
                notification_type: NotificationType::StatusChange,
                title: TITLE_JOB_COMPLETED.to_string(),
                message: completed_message(&updated.vehicle_number, &updated.vehicle_model),
                job_card_id: Some(id),
                priority: Priority::Medium,
            })
            .await;
    }

    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/jobcards/{id}/critical
pub async fn mark_critical(
    RequireTechnician(auth): RequireTechnician,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<MarkCriticalRequest>,
) -> AppResult<Json<DataResponse<JobCard>>> {
    let mut tx = state.pool.begin().await?;
    let current = JobCardRepo::lock_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| job_not_found(id))?;

    ensure_assigned_technician(auth.user_id, current.technician_id)?;
    let (reason, priority) = resolve_critical(&input.critical_reason, input.priority)?;

    let updated = JobCardRepo::mark_critical(
        &mut tx,
        id,
        &reason,
        priority,
        current.status()?,
        auth.user_id,
        &critical_note(&reason),
    )
    .await?;
    tx.commit().await?;

    tracing::warn!(job_card_id = id, %priority, reason = %reason, "Job card marked critical");

    state
        .notifier
        .dispatch(NewNotification {
            user_id: updated.created_by,
            notification_type: NotificationType::CriticalIssue,
            title: TITLE_CRITICAL_ISSUE.to_string(),
            message: critical_message(&updated.vehicle_number, &reason),
            job_card_id: Some(id),
            priority: Priority::Urgent,
        })
        .await;

    Ok(Json(DataResponse { data: updated }))
}
