//! HTTP handlers for barista fulfillment order endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::fulfillment::{
    AdvanceStatusInput, CreateFulfillmentInput, FulfillmentService,
};
use crate::AppState;
use crate::models::FulfillmentOrder;
use shared::types::ApiResponse;

/// Query parameters for listing orders
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    /// A status value, or `active` for every not-yet-completed order
    pub status: Option<String>,
}

/// List fulfillment orders with an optional status filter
pub async fn list_fulfillment_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> AppResult<Json<ApiResponse<Vec<FulfillmentOrder>>>> {
    let service = FulfillmentService::new(state.db);
    let orders = service.list_orders(query.status).await?;
    Ok(Json(ApiResponse::ok(orders)))
}

/// Get fulfillment order by ID
pub async fn get_fulfillment_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FulfillmentOrder>>> {
    let service = FulfillmentService::new(state.db);
    let order = service.get_order(order_id).await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// Create a fulfillment order for the authenticated cashier
pub async fn create_fulfillment_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateFulfillmentInput>,
) -> AppResult<Json<ApiResponse<FulfillmentOrder>>> {
    let service = FulfillmentService::new(state.db);
    let order = service
        .create_order(current_user.0.user_id, input)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        order,
        "Pesanan berhasil dibuat",
    )))
}

/// Advance a fulfillment order's status
pub async fn advance_fulfillment_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(input): Json<AdvanceStatusInput>,
) -> AppResult<Json<ApiResponse<FulfillmentOrder>>> {
    let service = FulfillmentService::new(state.db);
    let order = service.advance_status(order_id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        order,
        "Status pesanan berhasil diperbarui",
    )))
}

/// Delete a fulfillment order
pub async fn delete_fulfillment_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let service = FulfillmentService::new(state.db);
    service.delete_order(order_id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        (),
        "Pesanan berhasil dihapus",
    )))
}
