//! Handlers for the `/bills` resource.
//!
//! Bills are frozen once `PAID`: edits and deletions are rejected with 400.
//! The repository writes repeat the `PENDING` guard in SQL so a payment
//! racing an edit cannot slip through.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use workshop_core::billing::{compute_total, ensure_mutable, validate_items, BillChange};
use workshop_core::error::CoreError;
use workshop_core::job_status::JobStatus;
use workshop_core::notifications::{bill_message, NotificationType, TITLE_BILL_CREATED};
use workshop_core::types::DbId;
use workshop_db::models::bill::{Bill, BillDetail, CreateBill, UpdateBill};
use workshop_db::models::job_card::JobCard;
use workshop_db::models::notification::NewNotification;
use workshop_db::repositories::{BillRepo, JobCardRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{RequireCashier, RequireManagerOrCashier};
use crate::response::DataResponse;
use crate::state::AppState;

fn bill_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Bill", id })
}

/// Reject negative or non-finite charges.
fn validate_charge(label: &str, value: Option<f64>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(CoreError::validation(format!("{label} cannot be negative")))
        }
        _ => Ok(()),
    }
}

async fn load_bill(state: &AppState, id: DbId) -> AppResult<Bill> {
    BillRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| bill_not_found(id))
}

/// GET /api/bills
pub async fn list_bills(
    RequireManagerOrCashier(_auth): RequireManagerOrCashier,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BillDetail>>>> {
    let bills = BillRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: bills }))
}

/// GET /api/bills/{id}
pub async fn get_bill(
    RequireManagerOrCashier(_auth): RequireManagerOrCashier,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<BillDetail>>> {
    let bill = BillRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| bill_not_found(id))?;
    Ok(Json(DataResponse { data: bill }))
}

/// GET /api/bills/done-jobs
///
/// Completed job cards, i.e. the ones ready to be billed.
pub async fn done_jobs(
    RequireCashier(_auth): RequireCashier,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<JobCard>>>> {
    let cards = JobCardRepo::list_by_status(&state.pool, JobStatus::Done).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// POST /api/bills
pub async fn create_bill(
    RequireCashier(auth): RequireCashier,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateBill>,
) -> AppResult<(StatusCode, Json<DataResponse<Bill>>)> {
    validate_items(&input.items)?;
    validate_charge("Service charge", input.service_charge)?;
    validate_charge("Spare parts charge", input.spare_parts_charge)?;

    let job = JobCardRepo::find_by_id(&state.pool, input.job_card_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Job card",
            id: input.job_card_id,
        })?;

    let total = compute_total(&input.items);
    let bill = BillRepo::create(&state.pool, &input, total, auth.user_id).await?;
    tracing::info!(
        bill_id = bill.id,
        job_card_id = job.id,
        total_amount = bill.total_amount,
        "Bill created"
    );

    if job.created_by != auth.user_id {
        state
            .notifier
            .dispatch(NewNotification {
                user_id: job.created_by,
                notification_type: NotificationType::BillCreated,
                title: TITLE_BILL_CREATED.to_string(),
                message: bill_message(&job.vehicle_number, bill.total_amount),
                job_card_id: Some(job.id),
                priority: job.priority()?,
            })
            .await;
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: bill })))
}

/// PUT /api/bills/{id}
///
/// A non-empty `items` list replaces the stored items and recomputes the
/// total. An empty or absent list keeps the current items.
pub async fn update_bill(
    RequireCashier(auth): RequireCashier,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateBill>,
) -> AppResult<Json<DataResponse<Bill>>> {
    let current = load_bill(&state, id).await?;
    ensure_mutable(current.payment_status()?, BillChange::Edit)?;

    let items = input.items.as_deref().filter(|items| !items.is_empty());
    if let Some(items) = items {
        validate_items(items)?;
    }
    validate_charge("Service charge", input.service_charge)?;
    validate_charge("Spare parts charge", input.spare_parts_charge)?;

    let updated = BillRepo::update_pending(
        &state.pool,
        id,
        items,
        items.map(compute_total),
        input.service_charge,
        input.spare_parts_charge,
    )
    .await?
    .ok_or_else(|| CoreError::validation("Cannot edit paid bill"))?;

    tracing::info!(
        bill_id = id,
        updated_by = auth.user_id,
        total_amount = updated.total_amount,
        "Bill updated"
    );
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/bills/{id}
pub async fn delete_bill(
    RequireCashier(auth): RequireCashier,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let current = load_bill(&state, id).await?;
    ensure_mutable(current.payment_status()?, BillChange::Delete)?;

    if !BillRepo::delete_pending(&state.pool, id).await? {
        return Err(CoreError::validation("Cannot delete paid bill").into());
    }
    tracing::info!(bill_id = id, deleted_by = auth.user_id, "Bill deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/bills/{id}/toggle-payment
///
/// Flips `PENDING` and `PAID`. A concurrent toggle that already flipped the
/// bill yields 409.
pub async fn toggle_payment(
    RequireCashier(auth): RequireCashier,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Bill>>> {
    let current = load_bill(&state, id).await?;
    let status = current.payment_status()?;
    let next = status.toggled();

    let updated = BillRepo::set_payment_status(&state.pool, id, status, next)
        .await?
        .ok_or_else(|| {
            CoreError::Conflict("Bill payment status changed concurrently".into())
        })?;

    tracing::info!(bill_id = id, from = %status, to = %next, changed_by = auth.user_id, "Bill payment toggled");
    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/bills/{id}/pay
pub async fn mark_paid(
    RequireCashier(auth): RequireCashier,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Bill>>> {
    let updated = BillRepo::mark_paid(&state.pool, id)
        .await?
        .ok_or_else(|| bill_not_found(id))?;
    tracing::info!(bill_id = id, changed_by = auth.user_id, "Bill marked paid");
    Ok(Json(DataResponse { data: updated }))
}
