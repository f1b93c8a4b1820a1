//! Repository for the `bills` table.
//!
//! Writes that must not touch a paid bill carry a `payment_status = 'PENDING'`
//! guard in their `WHERE` clause, so a concurrent payment wins the race.

use sqlx::types::Json;
use sqlx::PgPool;
use workshop_core::billing::{BillItem, PaymentStatus};
use workshop_core::types::DbId;

use crate::models::bill::{Bill, BillDetail, CreateBill};

/// Column list for `bills` queries.
const COLUMNS: &str = "\
    id, job_card_id, items, service_charge, spare_parts_charge, total_amount, \
    payment_status, created_by, created_at, updated_at";

/// Select list for [`BillDetail`]; bills aliased `b`, job cards `j`, users `u`.
const DETAIL_SELECT: &str = "\
    SELECT b.id, b.job_card_id, b.items, b.service_charge, b.spare_parts_charge, \
           b.total_amount, b.payment_status, b.created_by, b.created_at, b.updated_at, \
           j.customer_name, j.vehicle_number, j.vehicle_model, u.name AS created_by_name \
    FROM bills b \
    JOIN job_cards j ON j.id = b.job_card_id \
    LEFT JOIN users u ON u.id = b.created_by";

/// Provides CRUD and payment operations for bills.
pub struct BillRepo;

impl BillRepo {
    /// Insert a bill in `PENDING` with a precomputed total.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBill,
        total_amount: f64,
        created_by: DbId,
    ) -> Result<Bill, sqlx::Error> {
        let query = format!(
            "INSERT INTO bills (\
                job_card_id, items, service_charge, spare_parts_charge, total_amount, \
                payment_status, created_by\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(input.job_card_id)
            .bind(Json(&input.items))
            .bind(input.service_charge.unwrap_or(0.0))
            .bind(input.spare_parts_charge.unwrap_or(0.0))
            .bind(total_amount)
            .bind(PaymentStatus::Pending.as_str())
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a bill by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bills WHERE id = $1");
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a bill with its job card and creator details.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<BillDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE b.id = $1");
        sqlx::query_as::<_, BillDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All bills with job card details, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<BillDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY b.created_at DESC, b.id DESC");
        sqlx::query_as::<_, BillDetail>(&query).fetch_all(pool).await
    }

    /// Update a pending bill.
    ///
    /// `items` and `total_amount` travel together: when new items are given
    /// the caller passes their recomputed total. Returns `None` if the bill
    /// does not exist or is no longer pending.
    pub async fn update_pending(
        pool: &PgPool,
        id: DbId,
        items: Option<&[BillItem]>,
        total_amount: Option<f64>,
        service_charge: Option<f64>,
        spare_parts_charge: Option<f64>,
    ) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!(
            "UPDATE bills SET \
                items = COALESCE($2, items), \
                total_amount = COALESCE($3, total_amount), \
                service_charge = COALESCE($4, service_charge), \
                spare_parts_charge = COALESCE($5, spare_parts_charge) \
             WHERE id = $1 AND payment_status = $6 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .bind(items.map(Json))
            .bind(total_amount)
            .bind(service_charge)
            .bind(spare_parts_charge)
            .bind(PaymentStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a pending bill. Returns `true` if a row was removed.
    pub async fn delete_pending(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bills WHERE id = $1 AND payment_status = $2")
            .bind(id)
            .bind(PaymentStatus::Pending.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Move a bill from `expected` to `next` payment status.
    ///
    /// Returns `None` when the bill is missing or its status is no longer
    /// `expected`.
    pub async fn set_payment_status(
        pool: &PgPool,
        id: DbId,
        expected: PaymentStatus,
        next: PaymentStatus,
    ) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!(
            "UPDATE bills SET payment_status = $3 \
             WHERE id = $1 AND payment_status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .bind(expected.as_str())
            .bind(next.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Set a bill to `PAID` whatever its current status.
    pub async fn mark_paid(pool: &PgPool, id: DbId) -> Result<Option<Bill>, sqlx::Error> {
        let query = format!(
            "UPDATE bills SET payment_status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bill>(&query)
            .bind(id)
            .bind(PaymentStatus::Paid.as_str())
            .fetch_optional(pool)
            .await
    }
}
