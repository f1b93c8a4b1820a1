//! Job card rules: priorities, vehicle types, who may act on a card, and
//! how a status change stamps the card's time tracking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::job_status::{validate_transition, JobStatus, ReversionPolicy};
use crate::roles::Role;
use crate::types::{DbId, Timestamp};

/// History note written when a card is opened.
pub const NOTE_JOB_CREATED: &str = "Job card created";

/// History note written when a technician closes a card via the summary form.
pub const NOTE_SUMMARY_COMPLETED: &str = "Service completed with summary";

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Urgency of a job card. Declaration order is ascending urgency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }

    /// Sort weight used by SQL `ORDER BY` (higher is more urgent).
    pub fn rank(self) -> i32 {
        self as i32 + 1
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                CoreError::validation(format!(
                    "Invalid priority '{s}'. Must be one of: LOW, MEDIUM, HIGH, URGENT"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Vehicle type
// ---------------------------------------------------------------------------

/// Kind of vehicle brought in for service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "2-wheeler")]
    TwoWheeler,
    #[serde(rename = "4-wheeler")]
    FourWheeler,
}

impl VehicleType {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::TwoWheeler => "2-wheeler",
            VehicleType::FourWheeler => "4-wheeler",
        }
    }
}

impl FromStr for VehicleType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2-wheeler" => Ok(VehicleType::TwoWheeler),
            "4-wheeler" => Ok(VehicleType::FourWheeler),
            other => Err(CoreError::validation(format!(
                "Invalid vehicle type '{other}'. Must be one of: 2-wheeler, 4-wheeler"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Authorization rules
// ---------------------------------------------------------------------------

/// True when `actor_id` is the technician assigned to the card.
pub fn is_assigned_technician(actor_id: DbId, technician_id: Option<DbId>) -> bool {
    technician_id == Some(actor_id)
}

/// Status changes are reserved for the assigned technician or a manager.
pub fn ensure_can_update_status(
    actor_id: DbId,
    actor_role: Role,
    technician_id: Option<DbId>,
) -> Result<(), CoreError> {
    if is_assigned_technician(actor_id, technician_id) || actor_role == Role::Manager {
        Ok(())
    } else {
        Err(CoreError::forbidden("Not authorized"))
    }
}

/// Service summaries and critical flags may only come from the assigned technician.
pub fn ensure_assigned_technician(
    actor_id: DbId,
    technician_id: Option<DbId>,
) -> Result<(), CoreError> {
    if is_assigned_technician(actor_id, technician_id) {
        Ok(())
    } else {
        Err(CoreError::forbidden("Not authorized"))
    }
}

// ---------------------------------------------------------------------------
// Status transitions
// ---------------------------------------------------------------------------

/// Time tracking fields of a job card as currently stored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeTracking {
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub actual_duration: Option<f64>,
}

/// The fully resolved effect of one accepted status change.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub from: JobStatus,
    pub to: JobStatus,
    pub tracking: TimeTracking,
    /// Note recorded on the history entry appended for this change.
    pub note: String,
}

/// Hours between two instants, rounded to one decimal place.
pub fn duration_hours(start: Timestamp, end: Timestamp) -> f64 {
    let hours = (end - start).num_milliseconds() as f64 / 3_600_000.0;
    (hours * 10.0).round() / 10.0
}

/// Note used when the caller does not supply one.
pub fn default_transition_note(from: JobStatus, to: JobStatus) -> String {
    format!("Status changed from {from} to {to}")
}

/// Note recorded when a technician raises the critical flag.
pub fn critical_note(reason: &str) -> String {
    format!("Marked as CRITICAL: {reason}")
}

/// Validate a status change and compute the resulting time tracking.
///
/// `started_at` and `completed_at` are write-once: entering `IN_PROGRESS` or
/// `DONE` only stamps them when they are still empty. The actual duration is
/// derived when `completed_at` is stamped and a start time exists.
pub fn plan_transition(
    from: JobStatus,
    tracking: TimeTracking,
    to: JobStatus,
    note: Option<&str>,
    now: Timestamp,
    policy: ReversionPolicy,
) -> Result<TransitionPlan, CoreError> {
    validate_transition(from, to, policy)?;

    let mut next = tracking;
    match to {
        JobStatus::InProgress if next.started_at.is_none() => {
            next.started_at = Some(now);
        }
        JobStatus::Done if next.completed_at.is_none() => {
            next.completed_at = Some(now);
            next.actual_duration = next.started_at.map(|start| duration_hours(start, now));
        }
        _ => {}
    }

    let note = match note.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => default_transition_note(from, to),
    };

    Ok(TransitionPlan {
        from,
        to,
        tracking: next,
        note,
    })
}

/// Validate a critical-flag reason and resolve the escalated priority.
pub fn resolve_critical(
    reason: &str,
    requested: Option<Priority>,
) -> Result<(String, Priority), CoreError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(CoreError::validation("Critical reason is required"));
    }
    Ok((reason.to_string(), requested.unwrap_or(Priority::Urgent)))
}
