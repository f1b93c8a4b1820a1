//! Notification entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use workshop_core::job_card::Priority;
use workshop_core::notifications::NotificationType;
use workshop_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub job_card_id: Option<DbId>,
    pub is_read: bool,
    pub priority: String,
    pub created_at: Timestamp,
}

/// Everything needed to persist a notification for one recipient.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: DbId,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub job_card_id: Option<DbId>,
    pub priority: Priority,
}

/// A page of notifications plus the recipient's total unread count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}
