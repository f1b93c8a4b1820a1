//! Aggregate queries backing the manager dashboard.

use sqlx::PgPool;
use workshop_core::billing::PaymentStatus;
use workshop_core::job_status::JobStatus;

use crate::models::dashboard::DashboardStats;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Compute job counts and paid revenue in a single round trip.
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, sqlx::Error> {
        sqlx::query_as::<_, DashboardStats>(
            "SELECT \
                (SELECT COUNT(*) FROM job_cards) AS total_jobs, \
                (SELECT COUNT(*) FROM job_cards WHERE status = $1) AS completed_jobs, \
                (SELECT COUNT(*) FROM job_cards WHERE status <> $1) AS pending_jobs, \
                (SELECT COALESCE(SUM(total_amount), 0)::float8 FROM bills \
                    WHERE payment_status = $2) AS total_revenue",
        )
        .bind(JobStatus::Done.as_str())
        .bind(PaymentStatus::Paid.as_str())
        .fetch_one(pool)
        .await
    }
}
