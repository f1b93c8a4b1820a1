//! Aggregate figures shown on the manager dashboard.

use serde::Serialize;
use sqlx::FromRow;

/// Counts and revenue, recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_jobs: i64,
    /// Job cards in `DONE`.
    pub completed_jobs: i64,
    /// Job cards in any status other than `DONE`.
    pub pending_jobs: i64,
    /// Sum of `total_amount` over `PAID` bills.
    pub total_revenue: f64,
}
