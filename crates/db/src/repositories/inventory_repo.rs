//! Postgres-backed parts catalog.

use async_trait::async_trait;
use sqlx::PgPool;
use workshop_core::error::CoreError;
use workshop_core::inventory::{
    insufficient_stock, is_searchable, validate_quantity, Part, PartCatalog, PartFilter,
    PartSummary, Reservation, LOW_STOCK_THRESHOLD, SEARCH_LIMIT, VEHICLE_TYPE_BOTH,
};
use workshop_core::search::contains_pattern;

use crate::models::inventory::PartRow;

/// Column list for `parts` queries.
const COLUMNS: &str = "id, part_number, name, category, price, stock, vehicle_type";

/// Catalog storage errors are not something a caller can act on.
fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Parts catalog query failed");
    CoreError::Internal(format!("Parts catalog unavailable: {err}"))
}

fn summaries(rows: Vec<PartRow>) -> Vec<PartSummary> {
    rows.into_iter().map(|r| Part::from(r).into()).collect()
}

/// Implements [`PartCatalog`] over the `parts` table.
#[derive(Clone)]
pub struct InventoryRepo {
    pool: PgPool,
}

impl InventoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartCatalog for InventoryRepo {
    async fn search(
        &self,
        query: &str,
        vehicle_type: Option<&str>,
    ) -> Result<Vec<PartSummary>, CoreError> {
        if !is_searchable(query) {
            return Ok(Vec::new());
        }

        let vehicle_clause = if vehicle_type.is_some() {
            "AND (vehicle_type = $3 OR vehicle_type = $4)"
        } else {
            ""
        };
        let sql = format!(
            "SELECT {COLUMNS} FROM parts \
             WHERE (name ILIKE $1 OR part_number ILIKE $1 OR category ILIKE $1) \
             {vehicle_clause} \
             ORDER BY id \
             LIMIT $2"
        );
        let mut q = sqlx::query_as::<_, PartRow>(&sql)
            .bind(contains_pattern(query))
            .bind(SEARCH_LIMIT);
        if let Some(vt) = vehicle_type {
            q = q.bind(vt).bind(VEHICLE_TYPE_BOTH);
        }
        let rows = q.fetch_all(&self.pool).await.map_err(storage_error)?;
        Ok(summaries(rows))
    }

    async fn find(&self, id: &str) -> Result<Option<Part>, CoreError> {
        let sql = format!("SELECT {COLUMNS} FROM parts WHERE id = $1");
        let row = sqlx::query_as::<_, PartRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(row.map(Part::from))
    }

    async fn list(&self, filter: &PartFilter) -> Result<Vec<PartSummary>, CoreError> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.category.is_some() {
            conditions.push(format!("category = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.vehicle_type.is_some() {
            conditions.push(format!(
                "(vehicle_type = ${} OR vehicle_type = ${})",
                bind_idx,
                bind_idx + 1
            ));
        }
        if filter.in_stock {
            conditions.push("stock > 0".to_string());
        }
        if filter.low_stock {
            conditions.push(format!("stock > 0 AND stock < {LOW_STOCK_THRESHOLD}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("SELECT {COLUMNS} FROM parts {where_clause} ORDER BY id");
        let mut q = sqlx::query_as::<_, PartRow>(&sql);
        if let Some(ref category) = filter.category {
            q = q.bind(category);
        }
        if let Some(ref vt) = filter.vehicle_type {
            q = q.bind(vt).bind(VEHICLE_TYPE_BOTH);
        }
        let rows = q.fetch_all(&self.pool).await.map_err(storage_error)?;
        Ok(summaries(rows))
    }

    async fn categories(&self) -> Result<Vec<String>, CoreError> {
        sqlx::query_scalar("SELECT DISTINCT category FROM parts ORDER BY category")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)
    }

    async fn reserve(&self, id: &str, quantity: i32) -> Result<Reservation, CoreError> {
        validate_quantity(quantity)?;

        let reserved: Option<(String, String, i32)> = sqlx::query_as(
            "UPDATE parts SET stock = stock - $2 \
             WHERE id = $1 AND stock >= $2 \
             RETURNING id, name, stock",
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        if let Some((part_id, part_name, remaining)) = reserved {
            tracing::info!(part_id = %part_id, quantity, remaining, "Reserved stock");
            return Ok(Reservation::new(part_id, part_name, quantity, remaining));
        }

        // Nothing updated: either the part is unknown or stock is short.
        match self.find(id).await? {
            Some(part) => Err(insufficient_stock(part.stock, quantity)),
            None => Err(CoreError::NotFoundByKey {
                entity: "Part",
                key: id.to_string(),
            }),
        }
    }
}
