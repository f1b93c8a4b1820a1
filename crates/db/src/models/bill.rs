//! Bill entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use workshop_core::billing::{BillItem, PaymentStatus};
use workshop_core::error::CoreError;
use workshop_core::types::{DbId, Timestamp};

/// A row from the `bills` table. Line items live in a JSONB column.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: DbId,
    pub job_card_id: DbId,
    pub items: Json<Vec<BillItem>>,
    pub service_charge: f64,
    pub spare_parts_charge: f64,
    pub total_amount: f64,
    pub payment_status: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Bill {
    pub fn payment_status(&self) -> Result<PaymentStatus, CoreError> {
        self.payment_status.parse()
    }
}

/// A bill joined with the job card and creator it refers to.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub bill: Bill,
    pub customer_name: String,
    pub vehicle_number: String,
    pub vehicle_model: String,
    pub created_by_name: Option<String>,
}

/// DTO for raising a bill against a job card.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBill {
    pub job_card_id: DbId,
    #[serde(default)]
    pub items: Vec<BillItem>,
    pub service_charge: Option<f64>,
    pub spare_parts_charge: Option<f64>,
}

/// DTO for editing a pending bill. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBill {
    pub items: Option<Vec<BillItem>>,
    pub service_charge: Option<f64>,
    pub spare_parts_charge: Option<f64>,
}
