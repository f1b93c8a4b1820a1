//! Job card status machine.
//!
//! A job card moves `NEW -> IN_PROGRESS -> DONE`. Jumping straight from
//! `NEW` to `DONE` is accepted (a job closed without ever being started has
//! no actual duration). Backward moves are governed by [`ReversionPolicy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_NEW: &str = "NEW";
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const STATUS_DONE: &str = "DONE";

/// Lifecycle status of a job card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    New,
    InProgress,
    Done,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::New, JobStatus::InProgress, JobStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::New => STATUS_NEW,
            JobStatus::InProgress => STATUS_IN_PROGRESS,
            JobStatus::Done => STATUS_DONE,
        }
    }

    /// Statuses from which `self` may be entered when only forward progress
    /// is allowed.
    fn forward_predecessors(self) -> &'static [JobStatus] {
        match self {
            JobStatus::New => &[],
            JobStatus::InProgress => &[JobStatus::New],
            JobStatus::Done => &[JobStatus::New, JobStatus::InProgress],
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| {
                CoreError::validation(format!(
                    "Invalid status '{s}'. Must be one of: {STATUS_NEW}, {STATUS_IN_PROGRESS}, \
                     {STATUS_DONE}"
                ))
            })
    }
}

/// Whether a job card may move backwards (e.g. `DONE -> IN_PROGRESS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReversionPolicy {
    /// Only forward moves are accepted.
    #[default]
    Forbid,
    /// Any move between two different statuses is accepted.
    Allow,
}

impl FromStr for ReversionPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forbid" => Ok(ReversionPolicy::Forbid),
            "allow" => Ok(ReversionPolicy::Allow),
            other => Err(CoreError::validation(format!(
                "Invalid reversion policy '{other}'. Must be one of: forbid, allow"
            ))),
        }
    }
}

/// All statuses a job card may be in immediately before entering `target`.
pub fn allowed_predecessors(target: JobStatus, policy: ReversionPolicy) -> Vec<JobStatus> {
    match policy {
        ReversionPolicy::Forbid => target.forward_predecessors().to_vec(),
        ReversionPolicy::Allow => JobStatus::ALL
            .into_iter()
            .filter(|s| *s != target)
            .collect(),
    }
}

/// Check a single move against the transition table.
///
/// Staying in the same status is never a transition and is rejected under
/// every policy, so each accepted call appends exactly one history entry
/// that records an actual change.
pub fn validate_transition(
    from: JobStatus,
    to: JobStatus,
    policy: ReversionPolicy,
) -> Result<(), CoreError> {
    if from == to {
        return Err(CoreError::Conflict(format!("Job card is already {to}")));
    }
    if allowed_predecessors(to, policy).contains(&from) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot move job card from {from} to {to}"
        )))
    }
}
