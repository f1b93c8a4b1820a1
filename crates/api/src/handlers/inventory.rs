//! Handlers for the `/inventory` resource.
//!
//! Every handler goes through the [`PartCatalog`] held in [`AppState`], so
//! the storage backend can be swapped without touching the HTTP layer.
//!
//! [`PartCatalog`]: workshop_core::inventory::PartCatalog

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use workshop_core::error::CoreError;
use workshop_core::inventory::{
    validate_quantity, PartDetail, PartFilter, PartSummary, Reservation, StockCheck,
};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /inventory/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub vehicle_type: Option<String>,
}

/// Request body for `POST /inventory/check-stock` and `POST /inventory/reserve`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRequest {
    pub part_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

/// GET /api/inventory/search?q=&vehicleType=
pub async fn search_parts(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchQuery>,
) -> AppResult<Json<DataResponse<Vec<PartSummary>>>> {
    let parts = state
        .catalog
        .search(&params.q, params.vehicle_type.as_deref())
        .await?;
    Ok(Json(DataResponse { data: parts }))
}

/// GET /api/inventory/parts
pub async fn list_parts(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<PartFilter>,
) -> AppResult<Json<DataResponse<Vec<PartSummary>>>> {
    let parts = state.catalog.list(&filter).await?;
    Ok(Json(DataResponse { data: parts }))
}

/// GET /api/inventory/categories
pub async fn categories(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let categories = state.catalog.categories().await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/inventory/part/{id}
pub async fn get_part(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<DataResponse<PartDetail>>> {
    let part = state
        .catalog
        .find(&id)
        .await?
        .ok_or(CoreError::NotFoundByKey {
            entity: "Part",
            key: id,
        })?;
    Ok(Json(DataResponse {
        data: PartDetail::from(part),
    }))
}

/// POST /api/inventory/check-stock
///
/// Always 200: an unknown part is reported as unavailable.
pub async fn check_stock(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<StockRequest>,
) -> AppResult<Json<DataResponse<StockCheck>>> {
    validate_quantity(input.quantity)?;
    let part = state.catalog.find(&input.part_id).await?;
    Ok(Json(DataResponse {
        data: StockCheck::evaluate(part.as_ref(), input.quantity),
    }))
}

/// POST /api/inventory/reserve
pub async fn reserve(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<StockRequest>,
) -> AppResult<Json<DataResponse<Reservation>>> {
    validate_quantity(input.quantity)?;
    let reservation = state.catalog.reserve(&input.part_id, input.quantity).await?;
    tracing::info!(
        part_id = %reservation.part_id,
        quantity = reservation.quantity,
        remaining_stock = reservation.remaining_stock,
        reserved_by = auth.user_id,
        "Stock reserved"
    );
    Ok(Json(DataResponse { data: reservation }))
}
