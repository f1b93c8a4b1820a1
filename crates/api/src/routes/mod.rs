pub mod auth;
pub mod bill;
pub mod health;
pub mod inventory;
pub mod job_card;
pub mod manager;
pub mod notification;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws?token=                           WebSocket (join + notification push)
///
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/me                             current profile
///
/// /jobcards                            list (manager, advisor), create (advisor)
/// /jobcards/my                         technician's assignments
/// /jobcards/{id}                       detail with history
/// /jobcards/{id}/status                status transition (PUT)
/// /jobcards/{id}/summary               service summary (PUT)
/// /jobcards/{id}/critical              critical flag (PUT)
///
/// /bills                               list, create
/// /bills/done-jobs                     completed job cards
/// /bills/{id}                          get, update, delete
/// /bills/{id}/toggle-payment           PENDING <-> PAID (PUT)
/// /bills/{id}/pay                      mark paid (PUT)
///
/// /manager/dashboard                   aggregate stats
/// /manager/jobs                        all job cards
/// /manager/technicians                 technician roster
///
/// /notifications                       list
/// /notifications/unread-count          unread count
/// /notifications/read-all              mark all read (PUT)
/// /notifications/{id}/read             mark one read (PUT)
/// /notifications/{id}                  delete
///
/// /inventory/search                    part search
/// /inventory/parts                     filtered listing
/// /inventory/categories                distinct categories
/// /inventory/part/{id}                 part detail
/// /inventory/check-stock               availability check (POST)
/// /inventory/reserve                   stock reservation (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/jobcards", job_card::router())
        .nest("/bills", bill::router())
        .nest("/manager", manager::router())
        .nest("/notifications", notification::router())
        .nest("/inventory", inventory::router())
}
