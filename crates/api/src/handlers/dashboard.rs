//! Handlers for the `/manager` resource.
//!
//! Everything is manager-only except the technician roster, which advisors
//! need to assign new job cards.

use axum::extract::State;
use axum::Json;
use workshop_db::models::dashboard::DashboardStats;
use workshop_db::models::job_card::{JobCard, JobCardFilter};
use workshop_db::models::user::TechnicianSummary;
use workshop_db::repositories::{DashboardRepo, JobCardRepo, UserRepo};

use crate::error::AppResult;
use crate::middleware::rbac::{RequireManager, RequireManagerOrAdvisor};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/manager/dashboard
///
/// Aggregates are recomputed on every call.
pub async fn dashboard(
    RequireManager(_auth): RequireManager,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let stats = DashboardRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/manager/jobs
pub async fn all_jobs(
    RequireManager(_auth): RequireManager,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<JobCard>>>> {
    let cards = JobCardRepo::list(&state.pool, &JobCardFilter::default()).await?;
    Ok(Json(DataResponse { data: cards }))
}

/// GET /api/manager/technicians
pub async fn technicians(
    RequireManagerOrAdvisor(_auth): RequireManagerOrAdvisor,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<TechnicianSummary>>>> {
    let technicians = UserRepo::list_technicians(&state.pool).await?;
    Ok(Json(DataResponse { data: technicians }))
}
