//! Job card entity, status history, and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use workshop_core::error::CoreError;
use workshop_core::job_card::{Priority, TimeTracking, VehicleType};
use workshop_core::job_status::JobStatus;
use workshop_core::types::{DbId, Timestamp};

/// A row from the `job_cards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    pub id: DbId,
    pub customer_name: String,
    pub customer_phone: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub vehicle_number: String,
    pub complaint: String,
    pub technician_id: Option<DbId>,
    pub status: String,
    pub priority: String,
    pub is_critical: bool,
    pub critical_reason: Option<String>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub estimated_duration: Option<f64>,
    pub actual_duration: Option<f64>,
    pub service_notes: Option<String>,
    pub recommendations: Option<String>,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl JobCard {
    pub fn status(&self) -> Result<JobStatus, CoreError> {
        self.status.parse()
    }

    pub fn priority(&self) -> Result<Priority, CoreError> {
        self.priority.parse()
    }

    pub fn time_tracking(&self) -> TimeTracking {
        TimeTracking {
            started_at: self.started_at,
            completed_at: self.completed_at,
            actual_duration: self.actual_duration,
        }
    }
}

/// A row from `job_card_status_history`, joined with the actor's name.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub id: DbId,
    pub job_card_id: DbId,
    pub status: String,
    pub changed_by: DbId,
    pub changed_by_name: Option<String>,
    pub changed_at: Timestamp,
    pub notes: String,
}

/// A job card together with its full status history, oldest entry first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCardDetail {
    #[serde(flatten)]
    pub job_card: JobCard,
    pub status_history: Vec<StatusHistoryEntry>,
}

/// DTO for opening a new job card.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobCard {
    #[validate(length(min = 1, max = 200, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, max = 30, message = "Customer phone is required"))]
    pub customer_phone: String,
    pub vehicle_type: VehicleType,
    #[validate(length(min = 1, max = 100, message = "Vehicle model is required"))]
    pub vehicle_model: String,
    #[validate(length(min = 1, max = 30, message = "Vehicle number is required"))]
    pub vehicle_number: String,
    #[serde(default)]
    pub complaint: String,
    pub technician_id: Option<DbId>,
    pub priority: Option<Priority>,
    #[validate(range(min = 0.0, message = "Estimated duration cannot be negative"))]
    pub estimated_duration: Option<f64>,
}

/// Query filters for listing job cards. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCardFilter {
    /// Case-insensitive substring over customer name, vehicle number and model.
    pub search: Option<String>,
    pub status: Option<JobStatus>,
    pub vehicle_type: Option<VehicleType>,
    pub technician_id: Option<DbId>,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub critical_only: bool,
    pub created_from: Option<Timestamp>,
    pub created_to: Option<Timestamp>,
}
