//! Route definitions for the `/inventory` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::inventory;
use crate::state::AppState;

/// Routes mounted at `/inventory`.
///
/// ```text
/// GET    /search         -> search_parts
/// GET    /parts          -> list_parts
/// GET    /categories     -> categories
/// GET    /part/{id}      -> get_part
/// POST   /check-stock    -> check_stock
/// POST   /reserve        -> reserve
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(inventory::search_parts))
        .route("/parts", get(inventory::list_parts))
        .route("/categories", get(inventory::categories))
        .route("/part/{id}", get(inventory::get_part))
        .route("/check-stock", post(inventory::check_stock))
        .route("/reserve", post(inventory::reserve))
}
