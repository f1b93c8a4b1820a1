//! Route definitions for the manager-only `/manager` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/manager`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/jobs", get(dashboard::all_jobs))
        .route("/technicians", get(dashboard::technicians))
}
