//! HTTP handlers for procurement (pengadaan) order endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::procurement::{
    CreateProcurementInput, ProcurementService, UpdateProcurementStatusInput,
};
use crate::AppState;
use crate::models::ProcurementOrder;
use shared::types::ApiResponse;

/// List all procurement orders
pub async fn list_procurement_orders(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ProcurementOrder>>>> {
    let service = ProcurementService::new(state.db);
    let orders = service.list_orders().await?;
    Ok(Json(ApiResponse::ok(orders)))
}

/// Get procurement order by ID
pub async fn get_procurement_order(
    State(state): State<AppState>,
    Path(pengadaan_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProcurementOrder>>> {
    let service = ProcurementService::new(state.db);
    let order = service.get_order(pengadaan_id).await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// Create a procurement order for the authenticated user
pub async fn create_procurement_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProcurementInput>,
) -> AppResult<Json<ApiResponse<ProcurementOrder>>> {
    let service = ProcurementService::new(state.db);
    let order = service
        .create_order(current_user.0.user_id, input)
        .await?;
    Ok(Json(ApiResponse::ok_with_message(
        order,
        "Pesanan bahan berhasil dibuat",
    )))
}

/// Update a procurement order's status
pub async fn update_procurement_order(
    State(state): State<AppState>,
    Path(pengadaan_id): Path<Uuid>,
    Json(input): Json<UpdateProcurementStatusInput>,
) -> AppResult<Json<ApiResponse<ProcurementOrder>>> {
    let service = ProcurementService::new(state.db);
    let order = service.update_status(pengadaan_id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        order,
        "Status pesanan berhasil diperbarui",
    )))
}
