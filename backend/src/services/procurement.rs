//! Material procurement (pengadaan) order state machine
//!
//! Orders move Pending -> Dikirim -> Diterima. The first transition into
//! `Diterima` increments the material's stock by the ordered quantity; the
//! stored status value is the idempotency witness, so re-marking a received
//! order never increments twice.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::material::MaterialService;
use shared::models::{receives_stock, MaterialUnit, ProcurementOrder, ProcurementStatus};
use shared::validation::validate_quantity;

/// Procurement order service
#[derive(Clone)]
pub struct ProcurementService {
    db: PgPool,
}

/// Input for creating a procurement order
#[derive(Debug, Deserialize)]
pub struct CreateProcurementInput {
    pub bahan_id: Uuid,
    pub jumlah: Decimal,
    pub tanggal_pesan: Option<NaiveDate>,
}

/// Input for updating a procurement order's status
#[derive(Debug, Deserialize)]
pub struct UpdateProcurementStatusInput {
    pub status: String,
    pub tanggal_terima: Option<NaiveDate>,
}

#[derive(Debug, FromRow)]
struct ProcurementRow {
    pengadaan_id: Uuid,
    bahan_id: Uuid,
    nama_bahan: String,
    satuan: String,
    user_id: Uuid,
    jumlah: Decimal,
    tanggal_pesan: NaiveDate,
    status: String,
    tanggal_terima: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProcurementRow {
    fn into_order(self) -> AppResult<ProcurementOrder> {
        let satuan = MaterialUnit::from_str(&self.satuan).ok_or_else(|| {
            AppError::Internal(format!("Unknown material unit in storage: {}", self.satuan))
        })?;
        let status = ProcurementStatus::from_str(&self.status).ok_or_else(|| {
            AppError::Internal(format!("Unknown order status in storage: {}", self.status))
        })?;
        Ok(ProcurementOrder {
            pengadaan_id: self.pengadaan_id,
            bahan_id: self.bahan_id,
            nama_bahan: self.nama_bahan,
            satuan,
            user_id: self.user_id,
            jumlah: self.jumlah,
            tanggal_pesan: self.tanggal_pesan,
            status,
            tanggal_terima: self.tanggal_terima,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ProcurementService {
    /// Create a new ProcurementService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a procurement order in the `Pending` state
    pub async fn create_order(
        &self,
        user_id: Uuid,
        input: CreateProcurementInput,
    ) -> AppResult<ProcurementOrder> {
        validate_quantity(input.jumlah).map_err(|msg| AppError::Validation {
            field: "jumlah".to_string(),
            message: msg.to_string(),
            message_id: "Jumlah harus lebih dari 0".to_string(),
        })?;

        let material_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM bahan_baku WHERE bahan_id = $1)",
        )
        .bind(input.bahan_id)
        .fetch_one(&self.db)
        .await?;

        if !material_exists {
            return Err(AppError::NotFound("Bahan baku".to_string()));
        }

        let tanggal_pesan = input
            .tanggal_pesan
            .unwrap_or_else(|| Utc::now().date_naive());

        let pengadaan_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO pengadaan (bahan_id, user_id, jumlah, tanggal_pesan, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING pengadaan_id
            "#,
        )
        .bind(input.bahan_id)
        .bind(user_id)
        .bind(input.jumlah)
        .bind(tanggal_pesan)
        .bind(ProcurementStatus::Pending.as_str())
        .fetch_one(&self.db)
        .await?;

        self.get_order(pengadaan_id).await
    }

    /// Get a procurement order by ID
    pub async fn get_order(&self, pengadaan_id: Uuid) -> AppResult<ProcurementOrder> {
        let row = sqlx::query_as::<_, ProcurementRow>(
            r#"
            SELECT pg.pengadaan_id, pg.bahan_id, b.nama_bahan, b.satuan, pg.user_id,
                   pg.jumlah, pg.tanggal_pesan, pg.status, pg.tanggal_terima,
                   pg.created_at, pg.updated_at
            FROM pengadaan pg
            JOIN bahan_baku b ON b.bahan_id = pg.bahan_id
            WHERE pg.pengadaan_id = $1
            "#,
        )
        .bind(pengadaan_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Pesanan bahan".to_string()))?;

        row.into_order()
    }

    /// List all procurement orders, newest first
    pub async fn list_orders(&self) -> AppResult<Vec<ProcurementOrder>> {
        let rows = sqlx::query_as::<_, ProcurementRow>(
            r#"
            SELECT pg.pengadaan_id, pg.bahan_id, b.nama_bahan, b.satuan, pg.user_id,
                   pg.jumlah, pg.tanggal_pesan, pg.status, pg.tanggal_terima,
                   pg.created_at, pg.updated_at
            FROM pengadaan pg
            JOIN bahan_baku b ON b.bahan_id = pg.bahan_id
            ORDER BY pg.tanggal_pesan DESC, pg.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(ProcurementRow::into_order).collect()
    }

    /// Update a procurement order's status
    ///
    /// The stock increment and the received date are applied only when this
    /// call is the first to move the order into `Diterima`; the check and
    /// the increment commit as one unit.
    pub async fn update_status(
        &self,
        pengadaan_id: Uuid,
        input: UpdateProcurementStatusInput,
    ) -> AppResult<ProcurementOrder> {
        let target = ProcurementStatus::from_str(&input.status)
            .ok_or_else(|| AppError::InvalidStatus(input.status.clone()))?;

        // Start transaction
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, (String, Uuid, Decimal)>(
            "SELECT status, bahan_id, jumlah FROM pengadaan WHERE pengadaan_id = $1 FOR UPDATE",
        )
        .bind(pengadaan_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Pesanan bahan".to_string()))?;

        let (current, bahan_id, jumlah) = row;
        let current = ProcurementStatus::from_str(&current).ok_or_else(|| {
            AppError::Internal(format!("Unknown order status in storage: {}", current))
        })?;

        if receives_stock(current, target) {
            MaterialService::apply_adjustment(&mut *tx, bahan_id, jumlah).await?;

            let tanggal_terima = input
                .tanggal_terima
                .unwrap_or_else(|| Utc::now().date_naive());

            sqlx::query(
                r#"
                UPDATE pengadaan
                SET status = $1, tanggal_terima = $2, updated_at = NOW()
                WHERE pengadaan_id = $3
                "#,
            )
            .bind(target.as_str())
            .bind(tanggal_terima)
            .bind(pengadaan_id)
            .execute(&mut *tx)
            .await?;
        } else {
            // tanggal_terima is only ever written on the first receipt
            sqlx::query(
                "UPDATE pengadaan SET status = $1, updated_at = NOW() WHERE pengadaan_id = $2",
            )
            .bind(target.as_str())
            .bind(pengadaan_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_order(pengadaan_id).await
    }
}
