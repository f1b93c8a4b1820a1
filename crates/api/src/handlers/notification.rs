//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and only ever
//! touch the caller's own notifications.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use workshop_core::error::CoreError;
use workshop_core::notifications::NOTIFICATION_LIST_LIMIT;
use workshop_core::types::DbId;
use workshop_db::models::notification::{Notification, NotificationList};
use workshop_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
}

/// Response for `GET /notifications/unread-count`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    pub unread_count: i64,
}

/// Response for `PUT /notifications/read-all`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResult {
    pub marked_read: u64,
}

fn notification_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Notification",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/notifications
///
/// Newest first, at most [`NOTIFICATION_LIST_LIMIT`] entries, with the
/// caller's total unread count.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<NotificationQuery>,
) -> AppResult<Json<DataResponse<NotificationList>>> {
    let unread_only = params.unread_only.unwrap_or(false);
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        unread_only,
        NOTIFICATION_LIST_LIMIT,
    )
    .await?;
    let unread_count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: NotificationList {
            notifications,
            unread_count,
        },
    }))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UnreadCount>>> {
    let unread_count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { unread_count },
    }))
}

/// PUT /api/notifications/{id}/read
///
/// 404 if the notification does not belong to the caller.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(notification_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Notification>>> {
    let notification = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id)
        .await?
        .ok_or_else(|| notification_not_found(notification_id))?;
    Ok(Json(DataResponse { data: notification }))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MarkAllReadResult>>> {
    let marked_read = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    tracing::debug!(user_id = auth.user_id, marked_read, "Notifications marked read");
    Ok(Json(DataResponse {
        data: MarkAllReadResult { marked_read },
    }))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(notification_id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !NotificationRepo::delete(&state.pool, notification_id, auth.user_id).await? {
        return Err(notification_not_found(notification_id));
    }
    Ok(StatusCode::NO_CONTENT)
}
