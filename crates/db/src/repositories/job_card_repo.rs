//! Repository for `job_cards` and `job_card_status_history`.
//!
//! Every write that changes a card's status appends one history row inside
//! the same transaction as the card update.

use sqlx::{PgPool, Postgres, Transaction};
use workshop_core::job_card::{Priority, TransitionPlan, NOTE_JOB_CREATED};
use workshop_core::job_status::JobStatus;
use workshop_core::search::contains_pattern;
use workshop_core::types::DbId;

use crate::models::job_card::{CreateJobCard, JobCard, JobCardFilter, StatusHistoryEntry};

/// Column list for `job_cards` queries.
const COLUMNS: &str = "\
    id, customer_name, customer_phone, vehicle_type, vehicle_model, vehicle_number, \
    complaint, technician_id, status, priority, is_critical, critical_reason, \
    started_at, completed_at, estimated_duration, actual_duration, \
    service_notes, recommendations, created_by, created_at, updated_at";

/// `ORDER BY` expression ranking priorities, most urgent highest.
fn priority_rank_sql() -> String {
    let arms: String = Priority::ALL
        .iter()
        .map(|p| format!(" WHEN '{}' THEN {}", p.as_str(), p.rank()))
        .collect();
    format!("CASE priority{arms} ELSE 0 END")
}

/// Provides queries and status-changing writes for job cards.
pub struct JobCardRepo;

impl JobCardRepo {
    /// Insert a job card in `NEW` along with its first history entry.
    pub async fn create(
        pool: &PgPool,
        input: &CreateJobCard,
        created_by: DbId,
    ) -> Result<JobCard, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO job_cards (\
                customer_name, customer_phone, vehicle_type, vehicle_model, vehicle_number, \
                complaint, technician_id, priority, estimated_duration, status, created_by\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let card = sqlx::query_as::<_, JobCard>(&query)
            .bind(input.customer_name.trim())
            .bind(input.customer_phone.trim())
            .bind(input.vehicle_type.as_str())
            .bind(input.vehicle_model.trim())
            .bind(input.vehicle_number.trim())
            .bind(input.complaint.trim())
            .bind(input.technician_id)
            .bind(input.priority.unwrap_or_default().as_str())
            .bind(input.estimated_duration)
            .bind(JobStatus::New.as_str())
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        Self::append_history(&mut tx, card.id, JobStatus::New, created_by, NOTE_JOB_CREATED)
            .await?;

        tx.commit().await?;
        Ok(card)
    }

    /// Find a job card by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<JobCard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM job_cards WHERE id = $1");
        sqlx::query_as::<_, JobCard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a job card and hold its row lock until `tx` ends.
    pub async fn lock_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
    ) -> Result<Option<JobCard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM job_cards WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, JobCard>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Status history for a card, oldest first.
    pub async fn history(
        pool: &PgPool,
        job_card_id: DbId,
    ) -> Result<Vec<StatusHistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, StatusHistoryEntry>(
            "SELECT h.id, h.job_card_id, h.status, h.changed_by, u.name AS changed_by_name, \
                    h.changed_at, h.notes \
             FROM job_card_status_history h \
             LEFT JOIN users u ON u.id = h.changed_by \
             WHERE h.job_card_id = $1 \
             ORDER BY h.changed_at, h.id",
        )
        .bind(job_card_id)
        .fetch_all(pool)
        .await
    }

    /// List job cards matching `filter`, newest first.
    pub async fn list(pool: &PgPool, filter: &JobCardFilter) -> Result<Vec<JobCard>, sqlx::Error> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(contains_pattern);

        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if search.is_some() {
            conditions.push(format!(
                "(customer_name ILIKE ${bind_idx} OR vehicle_number ILIKE ${bind_idx} \
                  OR vehicle_model ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.vehicle_type.is_some() {
            conditions.push(format!("vehicle_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.technician_id.is_some() {
            conditions.push(format!("technician_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.priority.is_some() {
            conditions.push(format!("priority = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.created_from.is_some() {
            conditions.push(format!("created_at >= ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.created_to.is_some() {
            conditions.push(format!("created_at <= ${bind_idx}"));
        }
        if filter.critical_only {
            conditions.push("is_critical = true".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM job_cards {where_clause} ORDER BY created_at DESC, id DESC"
        );
        let mut q = sqlx::query_as::<_, JobCard>(&query);
        if let Some(ref pattern) = search {
            q = q.bind(pattern);
        }
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(vehicle_type) = filter.vehicle_type {
            q = q.bind(vehicle_type.as_str());
        }
        if let Some(technician_id) = filter.technician_id {
            q = q.bind(technician_id);
        }
        if let Some(priority) = filter.priority {
            q = q.bind(priority.as_str());
        }
        if let Some(from) = filter.created_from {
            q = q.bind(from);
        }
        if let Some(to) = filter.created_to {
            q = q.bind(to);
        }
        q.fetch_all(pool).await
    }

    /// Cards assigned to a technician, most urgent first, then newest.
    pub async fn list_for_technician(
        pool: &PgPool,
        technician_id: DbId,
    ) -> Result<Vec<JobCard>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_cards WHERE technician_id = $1 \
             ORDER BY {} DESC, created_at DESC, id DESC",
            priority_rank_sql()
        );
        sqlx::query_as::<_, JobCard>(&query)
            .bind(technician_id)
            .fetch_all(pool)
            .await
    }

    /// Cards in a single status, most recently completed or created first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: JobStatus,
    ) -> Result<Vec<JobCard>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_cards WHERE status = $1 \
             ORDER BY COALESCE(completed_at, created_at) DESC, id DESC"
        );
        sqlx::query_as::<_, JobCard>(&query)
            .bind(status.as_str())
            .fetch_all(pool)
            .await
    }

    /// Persist an accepted status change and record it in the history.
    pub async fn apply_status_change(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        plan: &TransitionPlan,
        changed_by: DbId,
    ) -> Result<JobCard, sqlx::Error> {
        let query = format!(
            "UPDATE job_cards SET \
                status = $2, started_at = $3, completed_at = $4, actual_duration = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let card = sqlx::query_as::<_, JobCard>(&query)
            .bind(id)
            .bind(plan.to.as_str())
            .bind(plan.tracking.started_at)
            .bind(plan.tracking.completed_at)
            .bind(plan.tracking.actual_duration)
            .fetch_one(&mut **tx)
            .await?;

        Self::append_history(tx, id, plan.to, changed_by, &plan.note).await?;
        Ok(card)
    }

    /// Raise the critical flag. The history entry keeps the current status.
    pub async fn mark_critical(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        reason: &str,
        priority: Priority,
        current_status: JobStatus,
        changed_by: DbId,
        note: &str,
    ) -> Result<JobCard, sqlx::Error> {
        let query = format!(
            "UPDATE job_cards SET is_critical = true, critical_reason = $2, priority = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let card = sqlx::query_as::<_, JobCard>(&query)
            .bind(id)
            .bind(reason)
            .bind(priority.as_str())
            .fetch_one(&mut **tx)
            .await?;

        Self::append_history(tx, id, current_status, changed_by, note).await?;
        Ok(card)
    }

    /// Overwrite the service notes and recommendations.
    ///
    /// `None` leaves the stored value untouched.
    pub async fn update_summary(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        service_notes: Option<&str>,
        recommendations: Option<&str>,
    ) -> Result<JobCard, sqlx::Error> {
        let query = format!(
            "UPDATE job_cards SET \
                service_notes = COALESCE($2, service_notes), \
                recommendations = COALESCE($3, recommendations) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobCard>(&query)
            .bind(id)
            .bind(service_notes)
            .bind(recommendations)
            .fetch_one(&mut **tx)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn append_history(
        tx: &mut Transaction<'_, Postgres>,
        job_card_id: DbId,
        status: JobStatus,
        changed_by: DbId,
        notes: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO job_card_status_history (job_card_id, status, changed_by, notes) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(job_card_id)
        .bind(status.as_str())
        .bind(changed_by)
        .bind(notes)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_expression_covers_every_priority() {
        let sql = priority_rank_sql();
        assert!(sql.starts_with("CASE priority"));
        assert!(sql.contains("WHEN 'URGENT' THEN 4"));
        assert!(sql.contains("WHEN 'LOW' THEN 1"));
        assert!(sql.ends_with("ELSE 0 END"));
    }
}
