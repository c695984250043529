//! Recipe registry service: the bill of materials linking products to the
//! raw materials consumed when one unit is fulfilled

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{MaterialUnit, RecipeLine};
use shared::validation::validate_quantity;

/// Recipe registry service
#[derive(Clone)]
pub struct RecipeService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct RecipeLineRow {
    bahan_id: Uuid,
    nama_bahan: String,
    jumlah: Decimal,
    satuan: String,
}

impl RecipeLineRow {
    fn into_line(self) -> AppResult<RecipeLine> {
        let satuan = MaterialUnit::from_str(&self.satuan).ok_or_else(|| {
            AppError::Internal(format!("Unknown material unit in storage: {}", self.satuan))
        })?;
        Ok(RecipeLine {
            bahan_id: self.bahan_id,
            nama_bahan: self.nama_bahan,
            jumlah: self.jumlah,
            satuan,
        })
    }
}

/// Input for adding a recipe line to a product
#[derive(Debug, Deserialize)]
pub struct AddRecipeLineInput {
    pub bahan_id: Uuid,
    pub jumlah: Decimal,
}

/// Input for updating a recipe line quantity
#[derive(Debug, Deserialize)]
pub struct UpdateRecipeLineInput {
    pub jumlah: Decimal,
}

impl RecipeService {
    /// Create a new RecipeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get the bill of materials for a product
    ///
    /// An empty list is a valid recipe: fulfilling such a product consumes
    /// no material (e.g. a resale item).
    pub async fn get_recipe(&self, produk_id: Uuid) -> AppResult<Vec<RecipeLine>> {
        self.ensure_product_exists(produk_id).await?;

        let rows = sqlx::query_as::<_, RecipeLineRow>(
            r#"
            SELECT pb.bahan_id, b.nama_bahan, pb.jumlah, b.satuan
            FROM produk_bahan pb
            JOIN bahan_baku b ON b.bahan_id = pb.bahan_id
            WHERE pb.produk_id = $1
            ORDER BY b.nama_bahan ASC
            "#,
        )
        .bind(produk_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(RecipeLineRow::into_line).collect()
    }

    /// Add a recipe line; each (product, material) pair is unique
    pub async fn add_line(
        &self,
        produk_id: Uuid,
        input: AddRecipeLineInput,
    ) -> AppResult<RecipeLine> {
        validate_quantity(input.jumlah).map_err(|msg| AppError::Validation {
            field: "jumlah".to_string(),
            message: msg.to_string(),
            message_id: "Jumlah harus lebih dari 0".to_string(),
        })?;

        self.ensure_product_exists(produk_id).await?;

        let material_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bahan_baku WHERE bahan_id = $1)",
        )
        .bind(input.bahan_id)
        .fetch_one(&self.db)
        .await?;

        if !material_exists {
            return Err(AppError::NotFound("Bahan baku".to_string()));
        }

        let already_linked = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM produk_bahan WHERE produk_id = $1 AND bahan_id = $2)",
        )
        .bind(produk_id)
        .bind(input.bahan_id)
        .fetch_one(&self.db)
        .await?;

        if already_linked {
            return Err(AppError::Conflict {
                resource: "bahan_id".to_string(),
                message: "Material is already part of this product's recipe".to_string(),
                message_id: "Bahan baku sudah ditambahkan ke produk ini".to_string(),
            });
        }

        sqlx::query(
            "INSERT INTO produk_bahan (produk_id, bahan_id, jumlah) VALUES ($1, $2, $3)",
        )
        .bind(produk_id)
        .bind(input.bahan_id)
        .bind(input.jumlah)
        .execute(&self.db)
        .await?;

        self.get_line(produk_id, input.bahan_id).await
    }

    /// Update the quantity of an existing recipe line
    pub async fn update_line(
        &self,
        produk_id: Uuid,
        bahan_id: Uuid,
        input: UpdateRecipeLineInput,
    ) -> AppResult<RecipeLine> {
        validate_quantity(input.jumlah).map_err(|msg| AppError::Validation {
            field: "jumlah".to_string(),
            message: msg.to_string(),
            message_id: "Jumlah harus lebih dari 0".to_string(),
        })?;

        let result =
            sqlx::query("UPDATE produk_bahan SET jumlah = $1 WHERE produk_id = $2 AND bahan_id = $3")
                .bind(input.jumlah)
                .bind(produk_id)
                .bind(bahan_id)
                .execute(&self.db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Resep".to_string()));
        }

        self.get_line(produk_id, bahan_id).await
    }

    /// Remove a recipe line
    pub async fn remove_line(&self, produk_id: Uuid, bahan_id: Uuid) -> AppResult<()> {
        let result =
            sqlx::query("DELETE FROM produk_bahan WHERE produk_id = $1 AND bahan_id = $2")
                .bind(produk_id)
                .bind(bahan_id)
                .execute(&self.db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Resep".to_string()));
        }

        Ok(())
    }

    async fn get_line(&self, produk_id: Uuid, bahan_id: Uuid) -> AppResult<RecipeLine> {
        let row = sqlx::query_as::<_, RecipeLineRow>(
            r#"
            SELECT pb.bahan_id, b.nama_bahan, pb.jumlah, b.satuan
            FROM produk_bahan pb
            JOIN bahan_baku b ON b.bahan_id = pb.bahan_id
            WHERE pb.produk_id = $1 AND pb.bahan_id = $2
            "#,
        )
        .bind(produk_id)
        .bind(bahan_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Resep".to_string()))?;

        row.into_line()
    }

    async fn ensure_product_exists(&self, produk_id: Uuid) -> AppResult<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE produk_id = $1)",
        )
        .bind(produk_id)
        .fetch_one(&self.db)
        .await?;

        if !exists {
            return Err(AppError::NotFound("Produk".to_string()));
        }
        Ok(())
    }
}
