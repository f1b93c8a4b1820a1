//! Route definitions for the `/bills` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::bill;
use crate::state::AppState;

/// Routes mounted at `/bills`.
///
/// ```text
/// GET    /                      -> list_bills
/// POST   /                      -> create_bill
/// GET    /done-jobs             -> done_jobs
/// GET    /{id}                  -> get_bill
/// PUT    /{id}                  -> update_bill
/// DELETE /{id}                  -> delete_bill
/// PUT    /{id}/toggle-payment   -> toggle_payment
/// PUT    /{id}/pay              -> mark_paid
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bill::list_bills).post(bill::create_bill))
        .route("/done-jobs", get(bill::done_jobs))
        .route(
            "/{id}",
            get(bill::get_bill)
                .put(bill::update_bill)
                .delete(bill::delete_bill),
        )
        .route("/{id}/toggle-payment", put(bill::toggle_payment))
        .route("/{id}/pay", put(bill::mark_paid))
}
