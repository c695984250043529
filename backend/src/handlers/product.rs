//! HTTP handlers for product catalog and recipe endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::recipe::{AddRecipeLineInput, RecipeService, UpdateRecipeLineInput};
use crate::services::ProductService;
use crate::AppState;
use crate::models::{Product, RecipeLine};
use shared::types::ApiResponse;

/// List all products
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let service = ProductService::new(state.db);
    let products = service.list_products().await?;
    Ok(Json(ApiResponse::ok(products)))
}

/// Get product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(produk_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let service = ProductService::new(state.db);
    let product = service.get_product(produk_id).await?;
    Ok(Json(ApiResponse::ok(product)))
}

/// Get a product's bill of materials
pub async fn get_product_materials(
    State(state): State<AppState>,
    Path(produk_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<RecipeLine>>>> {
    let service = RecipeService::new(state.db);
    let recipe = service.get_recipe(produk_id).await?;
    Ok(Json(ApiResponse::ok(recipe)))
}

/// Add a material to a product's recipe
pub async fn add_product_material(
    State(state): State<AppState>,
    Path(produk_id): Path<Uuid>,
    Json(input): Json<AddRecipeLineInput>,
) -> AppResult<Json<ApiResponse<RecipeLine>>> {
    let service = RecipeService::new(state.db);
    let line = service.add_line(produk_id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        line,
        "Bahan baku berhasil ditambahkan ke produk",
    )))
}

/// Update the quantity of a recipe line
pub async fn update_product_material(
    State(state): State<AppState>,
    Path((produk_id, bahan_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateRecipeLineInput>,
) -> AppResult<Json<ApiResponse<RecipeLine>>> {
    let service = RecipeService::new(state.db);
    let line = service.update_line(produk_id, bahan_id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        line,
        "Resep berhasil diupdate",
    )))
}

/// Remove a material from a product's recipe
pub async fn remove_product_material(
    State(state): State<AppState>,
    Path((produk_id, bahan_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<()>>> {
    let service = RecipeService::new(state.db);
    service.remove_line(produk_id, bahan_id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        (),
        "Bahan baku berhasil dihapus dari produk",
    )))
}
