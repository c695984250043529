//! HTTP handlers for material (bahan baku) endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::material::{
    AdjustStockInput, CreateMaterialInput, MaterialService, UpdateMaterialInput,
};
use crate::AppState;
use crate::models::Material;
use shared::types::ApiResponse;

/// List all materials
pub async fn list_materials(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Material>>>> {
    let service = MaterialService::new(state.db);
    let materials = service.list_materials().await?;
    Ok(Json(ApiResponse::ok(materials)))
}

/// List materials below their minimum stock
pub async fn list_low_stock(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Material>>>> {
    let service = MaterialService::new(state.db);
    let materials = service.list_low_stock().await?;
    Ok(Json(ApiResponse::ok(materials)))
}

/// Get material by ID
pub async fn get_material(
    State(state): State<AppState>,
    Path(bahan_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Material>>> {
    let service = MaterialService::new(state.db);
    let material = service.get_material(bahan_id).await?;
    Ok(Json(ApiResponse::ok(material)))
}

/// Create a material
pub async fn create_material(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterialInput>,
) -> AppResult<Json<ApiResponse<Material>>> {
    let service = MaterialService::new(state.db);
    let material = service.create_material(input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        material,
        "Bahan baku berhasil dibuat",
    )))
}

/// Update a material
pub async fn update_material(
    State(state): State<AppState>,
    Path(bahan_id): Path<Uuid>,
    Json(input): Json<UpdateMaterialInput>,
) -> AppResult<Json<ApiResponse<Material>>> {
    let service = MaterialService::new(state.db);
    let material = service.update_material(bahan_id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        material,
        "Bahan baku berhasil diupdate",
    )))
}

/// Apply a signed stock adjustment to a material
pub async fn adjust_material_stock(
    State(state): State<AppState>,
    Path(bahan_id): Path<Uuid>,
    Json(input): Json<AdjustStockInput>,
) -> AppResult<Json<ApiResponse<Material>>> {
    let service = MaterialService::new(state.db);
    let material = service.adjust_stock(bahan_id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        material,
        "Stok bahan baku berhasil disesuaikan",
    )))
}

/// Delete a material
pub async fn delete_material(
    State(state): State<AppState>,
    Path(bahan_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let service = MaterialService::new(state.db);
    service.delete_material(bahan_id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        (),
        "Bahan baku berhasil dihapus",
    )))
}
