//! Notification kinds and the WebSocket event names used to deliver them.
//!
//! Notifications are persisted first and pushed second. A push is
//! at-most-once: a stored notification is not necessarily delivered live,
//! and clients reconcile by listing their notifications over REST.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inbound WebSocket event subscribing the connection to a user's pushes.
pub const WS_EVENT_JOIN: &str = "join";

/// Outbound WebSocket event carrying a freshly created notification.
pub const WS_EVENT_NOTIFICATION: &str = "notification";

/// Default page size when listing notifications.
pub const NOTIFICATION_LIST_LIMIT: i64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    CriticalIssue,
    StatusChange,
    NewJob,
    BillCreated,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::CriticalIssue => "CRITICAL_ISSUE",
            NotificationType::StatusChange => "STATUS_CHANGE",
            NotificationType::NewJob => "NEW_JOB",
            NotificationType::BillCreated => "BILL_CREATED",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Message templates
// ---------------------------------------------------------------------------

pub const TITLE_NEW_JOB: &str = "New Job Assigned";
pub const TITLE_STATUS_UPDATED: &str = "Job Status Updated";
pub const TITLE_JOB_COMPLETED: &str = "Job Completed";
pub const TITLE_CRITICAL_ISSUE: &str = "Critical Issue Reported";
pub const TITLE_BILL_CREATED: &str = "Bill Created";

pub fn new_job_message(vehicle_number: &str, vehicle_model: &str) -> String {
    format!("New job card for {vehicle_number} - {vehicle_model}")
}

pub fn status_message(vehicle_number: &str, status: &str) -> String {
    format!("{vehicle_number} status: {status}")
}

pub fn completed_message(vehicle_number: &str, vehicle_model: &str) -> String {
    format!("{vehicle_number} - {vehicle_model} service completed")
}

pub fn critical_message(vehicle_number: &str, reason: &str) -> String {
    format!("{vehicle_number}: {reason}")
}

pub fn bill_message(vehicle_number: &str, total: f64) -> String {
    format!("Bill of {total:.2} raised for {vehicle_number}")
}
