//! Material ledger service: raw material records and atomic stock movements
//!
//! Stock is only ever mutated through the clamped adjustment below or an
//! explicit manual correction via `update_material`. Status is derived on
//! every read, never stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{derive_material_status, Material, MaterialUnit};
use shared::validation::{validate_name, validate_stock_level};

/// Material ledger service owning the authoritative stock per raw material
#[derive(Clone)]
pub struct MaterialService {
    db: PgPool,
}

/// Raw database row; status is not a column
#[derive(Debug, FromRow)]
pub(crate) struct MaterialRow {
    pub bahan_id: Uuid,
    pub nama_bahan: String,
    pub stok_saat_ini: Decimal,
    pub stok_minimum: Decimal,
    pub satuan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaterialRow {
    /// Map to the domain model, deriving the stock status
    pub(crate) fn into_material(self) -> AppResult<Material> {
        let satuan = MaterialUnit::from_str(&self.satuan).ok_or_else(|| {
            AppError::Internal(format!("Unknown material unit in storage: {}", self.satuan))
        })?;
        Ok(Material {
            bahan_id: self.bahan_id,
            nama_bahan: self.nama_bahan,
            status: derive_material_status(self.stok_saat_ini, self.stok_minimum),
            stok_saat_ini: self.stok_saat_ini,
            stok_minimum: self.stok_minimum,
            satuan,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Input for creating a material
#[derive(Debug, Deserialize)]
pub struct CreateMaterialInput {
    pub nama_bahan: String,
    #[serde(default)]
    pub stok_saat_ini: Decimal,
    pub stok_minimum: Decimal,
    pub satuan: MaterialUnit,
}

/// Input for updating a material
#[derive(Debug, Deserialize)]
pub struct UpdateMaterialInput {
    pub nama_bahan: Option<String>,
    pub stok_saat_ini: Option<Decimal>,
    pub stok_minimum: Option<Decimal>,
    pub satuan: Option<MaterialUnit>,
}

/// Input for a signed stock adjustment
#[derive(Debug, Deserialize)]
pub struct AdjustStockInput {
    pub delta: Decimal,
}

impl MaterialService {
    /// Create a new MaterialService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a material
    pub async fn create_material(&self, input: CreateMaterialInput) -> AppResult<Material> {
        validate_name(&input.nama_bahan).map_err(|msg| AppError::Validation {
            field: "nama_bahan".to_string(),
            message: msg.to_string(),
            message_id: "Nama bahan tidak valid".to_string(),
        })?;
        validate_stock_level(input.stok_saat_ini).map_err(|msg| AppError::Validation {
            field: "stok_saat_ini".to_string(),
            message: msg.to_string(),
            message_id: "Stok tidak boleh negatif".to_string(),
        })?;
        validate_stock_level(input.stok_minimum).map_err(|msg| AppError::Validation {
            field: "stok_minimum".to_string(),
            message: msg.to_string(),
            message_id: "Stok minimum tidak boleh negatif".to_string(),
        })?;

        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            INSERT INTO bahan_baku (nama_bahan, stok_saat_ini, stok_minimum, satuan)
            VALUES ($1, $2, $3, $4)
            RETURNING bahan_id, nama_bahan, stok_saat_ini, stok_minimum, satuan,
                      created_at, updated_at
            "#,
        )
        .bind(input.nama_bahan.trim())
        .bind(input.stok_saat_ini)
        .bind(input.stok_minimum)
        .bind(input.satuan.as_str())
        .fetch_one(&self.db)
        .await?;

        row.into_material()
    }

    /// Get material by ID
    pub async fn get_material(&self, bahan_id: Uuid) -> AppResult<Material> {
        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT bahan_id, nama_bahan, stok_saat_ini, stok_minimum, satuan,
                   created_at, updated_at
            FROM bahan_baku
            WHERE bahan_id = $1
            "#,
        )
        .bind(bahan_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bahan baku".to_string()))?;

        row.into_material()
    }

    /// List all materials
    pub async fn list_materials(&self) -> AppResult<Vec<Material>> {
        let rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT bahan_id, nama_bahan, stok_saat_ini, stok_minimum, satuan,
                   created_at, updated_at
            FROM bahan_baku
            ORDER BY nama_bahan ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(MaterialRow::into_material).collect()
    }

    /// List materials whose stock has fallen below their minimum
    pub async fn list_low_stock(&self) -> AppResult<Vec<Material>> {
        let rows = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT bahan_id, nama_bahan, stok_saat_ini, stok_minimum, satuan,
                   created_at, updated_at
            FROM bahan_baku
            WHERE stok_saat_ini < stok_minimum
            ORDER BY nama_bahan ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(MaterialRow::into_material).collect()
    }

    /// Update a material; absent fields keep their stored value
    pub async fn update_material(
        &self,
        bahan_id: Uuid,
        input: UpdateMaterialInput,
    ) -> AppResult<Material> {
        let existing = sqlx::query_as::<_, MaterialRow>(
            r#"
            SELECT bahan_id, nama_bahan, stok_saat_ini, stok_minimum, satuan,
                   created_at, updated_at
            FROM bahan_baku
            WHERE bahan_id = $1
            "#,
        )
        .bind(bahan_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bahan baku".to_string()))?;

        let nama_bahan = input.nama_bahan.unwrap_or(existing.nama_bahan);
        let stok_saat_ini = input.stok_saat_ini.unwrap_or(existing.stok_saat_ini);
        let stok_minimum = input.stok_minimum.unwrap_or(existing.stok_minimum);
        let satuan = input
            .satuan
            .map(|s| s.as_str().to_string())
            .unwrap_or(existing.satuan);

        validate_name(&nama_bahan).map_err(|msg| AppError::Validation {
            field: "nama_bahan".to_string(),
            message: msg.to_string(),
            message_id: "Nama bahan tidak valid".to_string(),
        })?;
        validate_stock_level(stok_saat_ini).map_err(|msg| AppError::Validation {
            field: "stok_saat_ini".to_string(),
            message: msg.to_string(),
            message_id: "Stok tidak boleh negatif".to_string(),
        })?;
        validate_stock_level(stok_minimum).map_err(|msg| AppError::Validation {
            field: "stok_minimum".to_string(),
            message: msg.to_string(),
            message_id: "Stok minimum tidak boleh negatif".to_string(),
        })?;

        let row = sqlx::query_as::<_, MaterialRow>(
            r#"
            UPDATE bahan_baku
            SET nama_bahan = $1, stok_saat_ini = $2, stok_minimum = $3, satuan = $4,
                updated_at = NOW()
            WHERE bahan_id = $5
            RETURNING bahan_id, nama_bahan, stok_saat_ini, stok_minimum, satuan,
                      created_at, updated_at
            "#,
        )
        .bind(nama_bahan.trim())
        .bind(stok_saat_ini)
        .bind(stok_minimum)
        .bind(&satuan)
        .bind(bahan_id)
        .fetch_one(&self.db)
        .await?;

        row.into_material()
    }

    /// Delete a material
    ///
    /// Materials referenced by a recipe line or an open procurement order
    /// are protected by foreign keys; the violation surfaces as a conflict.
    pub async fn delete_material(&self, bahan_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bahan_baku WHERE bahan_id = $1")
            .bind(bahan_id)
            .execute(&self.db)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => {
                Err(AppError::NotFound("Bahan baku".to_string()))
            }
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(AppError::Conflict {
                    resource: "bahan_id".to_string(),
                    message: "Material is still referenced by a recipe or an order".to_string(),
                    message_id:
                        "Bahan baku tidak dapat dihapus karena masih digunakan dalam produk atau pesanan"
                            .to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Atomically adjust a material's stock by a signed delta, clamped at zero
    ///
    /// Returns the post-adjustment material with its status recomputed.
    pub async fn adjust_stock(&self, bahan_id: Uuid, input: AdjustStockInput) -> AppResult<Material> {
        let mut conn = self.db.acquire().await?;
        let row = Self::apply_adjustment(&mut *conn, bahan_id, input.delta).await?;
        row.into_material()
    }

    /// The single stock-adjustment primitive, usable inside a caller's
    /// transaction
    ///
    /// The row is locked and the clamped new stock is computed and written
    /// in one statement, so concurrent adjustments to the same material
    /// serialize on the row lock. A clamp that truncates a deduction is
    /// logged.
    pub(crate) async fn apply_adjustment(
        conn: &mut PgConnection,
        bahan_id: Uuid,
        delta: Decimal,
    ) -> AppResult<MaterialRow> {
        #[derive(FromRow)]
        struct AdjustedRow {
            bahan_id: Uuid,
            nama_bahan: String,
            stok_saat_ini: Decimal,
            stok_minimum: Decimal,
            satuan: String,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
            stok_sebelum: Decimal,
        }

        let row = sqlx::query_as::<_, AdjustedRow>(
            r#"
            WITH sebelum AS (
                SELECT bahan_id, stok_saat_ini FROM bahan_baku
                WHERE bahan_id = $1
                FOR UPDATE
            )
            UPDATE bahan_baku b
            SET stok_saat_ini = GREATEST(0, b.stok_saat_ini + $2), updated_at = NOW()
            FROM sebelum s
            WHERE b.bahan_id = s.bahan_id
            RETURNING b.bahan_id, b.nama_bahan, b.stok_saat_ini, b.stok_minimum, b.satuan,
                      b.created_at, b.updated_at, s.stok_saat_ini AS stok_sebelum
            "#,
        )
        .bind(bahan_id)
        .bind(delta)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Bahan baku".to_string()))?;

        if row.stok_sebelum + delta < Decimal::ZERO {
            tracing::warn!(
                bahan_id = %row.bahan_id,
                nama_bahan = %row.nama_bahan,
                stok_sebelum = %row.stok_sebelum,
                delta = %delta,
                "stock deduction clamped at zero"
            );
        }

        Ok(MaterialRow {
            bahan_id: row.bahan_id,
            nama_bahan: row.nama_bahan,
            stok_saat_ini: row.stok_saat_ini,
            stok_minimum: row.stok_minimum,
            satuan: row.satuan,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
