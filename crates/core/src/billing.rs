//! Bill line items, totals, and payment status rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single charge on a bill.
///
/// The optional part fields link the line back to the inventory catalog
/// when the item was picked from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub name: String,
    /// Unit price.
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub part_id: Option<String>,
    #[serde(default)]
    pub part_number: Option<String>,
    /// Stock count reported by the catalog when the item was billed.
    #[serde(default)]
    pub stock_available: Option<i32>,
}

fn default_quantity() -> i32 {
    1
}

impl BillItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Sum of `price * quantity` across all items.
pub fn compute_total(items: &[BillItem]) -> f64 {
    items.iter().map(BillItem::line_total).sum()
}

/// Reject empty bills and malformed line items.
pub fn validate_items(items: &[BillItem]) -> Result<(), CoreError> {
    if items.is_empty() {
        return Err(CoreError::validation("Bill items required"));
    }
    for (idx, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(CoreError::validation(format!(
                "Item {} must have a name",
                idx + 1
            )));
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(CoreError::validation(format!(
                "Item '{}' has an invalid price",
                item.name
            )));
        }
        if item.quantity < 1 {
            return Err(CoreError::validation(format!(
                "Item '{}' must have a quantity of at least 1",
                item.name
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Payment status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
        }
    }

    /// `PENDING` becomes `PAID` and vice versa.
    pub fn toggled(self) -> Self {
        match self {
            PaymentStatus::Pending => PaymentStatus::Paid,
            PaymentStatus::Paid => PaymentStatus::Pending,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(PaymentStatus::Pending),
            "PAID" => Ok(PaymentStatus::Paid),
            other => Err(CoreError::validation(format!(
                "Invalid payment status '{other}'. Must be one of: PENDING, PAID"
            ))),
        }
    }
}

/// What a caller is trying to do to an existing bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillChange {
    Edit,
    Delete,
}

/// Paid bills are frozen: no edits, no deletion.
pub fn ensure_mutable(status: PaymentStatus, change: BillChange) -> Result<(), CoreError> {
    match (status, change) {
        (PaymentStatus::Pending, _) => Ok(()),
        (PaymentStatus::Paid, BillChange::Edit) => {
            Err(CoreError::validation("Cannot edit paid bill"))
        }
        (PaymentStatus::Paid, BillChange::Delete) => {
            Err(CoreError::validation("Cannot delete paid bill"))
        }
    }
}
