//! Route definitions for the `/jobcards` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::job_card;
use crate::state::AppState;

/// Routes mounted at `/jobcards`.
///
/// ```text
/// GET    /                 -> list_job_cards
/// POST   /                 -> create_job_card
/// GET    /my               -> my_job_cards
/// GET    /{id}             -> get_job_card
/// PUT    /{id}/status      -> update_status
/// PUT    /{id}/summary     -> update_summary
/// PUT    /{id}/critical    -> mark_critical
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(job_card::list_job_cards).post(job_card::create_job_card),
        )
        .route("/my", get(job_card::my_job_cards))
        .route("/{id}", get(job_card::get_job_card))
        .route("/{id}/status", put(job_card::update_status))
        .route("/{id}/summary", put(job_card::update_summary))
        .route("/{id}/critical", put(job_card::mark_critical))
}
