//! Row mapping for the `parts` table.

use sqlx::FromRow;
use workshop_core::inventory::Part;

#[derive(Debug, Clone, FromRow)]
pub struct PartRow {
    pub id: String,
    pub part_number: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: i32,
    pub vehicle_type: String,
}

impl From<PartRow> for Part {
    fn from(row: PartRow) -> Self {
        Part {
            id: row.id,
            part_number: row.part_number,
            name: row.name,
            category: row.category,
            price: row.price,
            stock: row.stock,
            vehicle_type: row.vehicle_type,
        }
    }
}
