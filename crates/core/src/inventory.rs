//! Spare-part catalog: value types, stock rules and the storage contract.
//!
//! [`PartCatalog`] is implemented by the database layer; handlers only ever
//! see the trait object held in application state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Queries shorter than this return no results.
pub const MIN_SEARCH_LEN: usize = 2;

/// Maximum number of hits returned by a search.
pub const SEARCH_LIMIT: i64 = 10;

/// A part with fewer units than this is reported as low on stock.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Applicability marker for parts that fit every vehicle type.
pub const VEHICLE_TYPE_BOTH: &str = "both";

pub const PART_WARRANTY: &str = "6 months";

/// A catalog entry as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: String,
    pub part_number: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
    pub vehicle_type: String,
}

/// Stock flags derived from a raw count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockStatus {
    pub in_stock: bool,
    pub low_stock: bool,
}

pub fn stock_status(stock: i32) -> StockStatus {
    StockStatus {
        in_stock: stock > 0,
        low_stock: stock < LOW_STOCK_THRESHOLD,
    }
}

/// Listing/search projection of a part.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartSummary {
    pub id: String,
    pub part_number: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
    pub in_stock: bool,
    pub low_stock: bool,
}

impl From<Part> for PartSummary {
    fn from(part: Part) -> Self {
        let flags = stock_status(part.stock);
        Self {
            id: part.id,
            part_number: part.part_number,
            name: part.name,
            category: part.category,
            price: part.price,
            stock: part.stock,
            in_stock: flags.in_stock,
            low_stock: flags.low_stock,
        }
    }
}

/// Single-part view with descriptive extras.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartDetail {
    pub id: String,
    pub part_number: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
    pub vehicle_type: String,
    pub in_stock: bool,
    pub low_stock: bool,
    pub description: String,
    pub warranty: &'static str,
}

impl From<Part> for PartDetail {
    fn from(part: Part) -> Self {
        let flags = stock_status(part.stock);
        Self {
            description: format!("{} - {}", part.name, part.category),
            warranty: PART_WARRANTY,
            in_stock: flags.in_stock,
            low_stock: flags.low_stock,
            id: part.id,
            part_number: part.part_number,
            name: part.name,
            category: part.category,
            price: part.price,
            stock: part.stock,
            vehicle_type: part.vehicle_type,
        }
    }
}

/// Filters accepted by [`PartCatalog::list`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartFilter {
    pub category: Option<String>,
    /// Matches parts for this vehicle type plus parts marked `both`.
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
    /// Parts with `0 < stock < LOW_STOCK_THRESHOLD`.
    #[serde(default)]
    pub low_stock: bool,
}

/// Answer to "can I take `requested` units of this part?".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockCheck {
    pub available: bool,
    pub message: String,
    pub current_stock: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_quantity: Option<i32>,
}

impl StockCheck {
    pub fn evaluate(part: Option<&Part>, requested: i32) -> Self {
        let Some(part) = part else {
            return Self {
                available: false,
                message: "Part not found".to_string(),
                current_stock: 0,
                requested_quantity: None,
            };
        };
        let available = part.stock >= requested;
        let message = if available {
            format!("{} units available", part.stock)
        } else {
            format!(
                "Only {} units available, {requested} requested",
                part.stock
            )
        };
        Self {
            available,
            message,
            current_stock: part.stock,
            requested_quantity: Some(requested),
        }
    }
}

/// Outcome of a successful stock reservation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub message: String,
    pub part_id: String,
    pub part_name: String,
    pub quantity: i32,
    pub remaining_stock: i32,
}

impl Reservation {
    pub fn new(part_id: String, part_name: String, quantity: i32, remaining_stock: i32) -> Self {
        Self {
            message: format!("Reserved {quantity} unit(s) of {part_name}"),
            part_id,
            part_name,
            quantity,
            remaining_stock,
        }
    }
}

pub fn insufficient_stock(available: i32, requested: i32) -> CoreError {
    CoreError::Conflict(format!(
        "Insufficient stock. Available: {available}, Requested: {requested}"
    ))
}

pub fn validate_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity < 1 {
        return Err(CoreError::validation("Quantity must be at least 1"));
    }
    Ok(())
}

/// Whether `query` is long enough to be worth searching for.
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_SEARCH_LEN
}

/// Storage backend for the parts catalog.
#[async_trait]
pub trait PartCatalog: Send + Sync {
    /// Case-insensitive match on name, part number or category; at most
    /// [`SEARCH_LIMIT`] hits. Short queries yield an empty list.
    async fn search(
        &self,
        query: &str,
        vehicle_type: Option<&str>,
    ) -> Result<Vec<PartSummary>, CoreError>;

    async fn find(&self, id: &str) -> Result<Option<Part>, CoreError>;

    async fn list(&self, filter: &PartFilter) -> Result<Vec<PartSummary>, CoreError>;

    /// Distinct categories, sorted.
    async fn categories(&self) -> Result<Vec<String>, CoreError>;

    /// Atomically take `quantity` units out of stock.
    async fn reserve(&self, id: &str, quantity: i32) -> Result<Reservation, CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(stock: i32) -> Part {
        Part {
            id: "P004".into(),
            part_number: "SPARK-2W-001".into(),
            name: "Spark Plug".into(),
            category: "Engine".into(),
            price: 150.0,
            stock,
            vehicle_type: "2-wheeler".into(),
        }
    }

    #[test]
    fn stock_flags() {
        assert_eq!(stock_status(0), StockStatus { in_stock: false, low_stock: true });
        assert_eq!(stock_status(9), StockStatus { in_stock: true, low_stock: true });
        assert_eq!(stock_status(10), StockStatus { in_stock: true, low_stock: false });
    }

    #[test]
    fn detail_adds_description_and_warranty() {
        let detail = PartDetail::from(part(100));
        assert_eq!(detail.description, "Spark Plug - Engine");
        assert_eq!(detail.warranty, "6 months");
        assert!(detail.in_stock);
        assert!(!detail.low_stock);
    }

    #[test]
    fn stock_check_messages() {
        let p = part(5);
        let ok = StockCheck::evaluate(Some(&p), 3);
        assert!(ok.available);
        assert_eq!(ok.message, "5 units available");

        let short = StockCheck::evaluate(Some(&p), 8);
        assert!(!short.available);
        assert_eq!(short.message, "Only 5 units available, 8 requested");

        let missing = StockCheck::evaluate(None, 1);
        assert!(!missing.available);
        assert_eq!(missing.message, "Part not found");
        assert_eq!(missing.current_stock, 0);
    }

    #[test]
    fn reservation_message() {
        let r = Reservation::new("P004".into(), "Spark Plug".into(), 2, 98);
        assert_eq!(r.message, "Reserved 2 unit(s) of Spark Plug");
    }

    #[test]
    fn short_queries_are_not_searchable() {
        assert!(!is_searchable(""));
        assert!(!is_searchable(" a "));
        assert!(is_searchable("oi"));
    }
}
