//! Barista fulfillment order state machine
//!
//! Orders move waiting -> processing -> ready -> completed. The first
//! transition into `completed` deducts material stock according to the
//! product recipes; the stored status value is the idempotency witness, so
//! repeating the completion request never deducts twice.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::material::MaterialService;
use shared::models::{deducts_stock, FulfillmentItem, FulfillmentOrder, FulfillmentStatus};
use shared::validation::{validate_item_quantity, validate_line_items};

/// Fulfillment order service
#[derive(Clone)]
pub struct FulfillmentService {
    db: PgPool,
}

/// Input for creating a fulfillment order
#[derive(Debug, Deserialize)]
pub struct CreateFulfillmentInput {
    /// Originating sales transaction, if the order was seeded by a sale
    pub transaksi_id: Option<Uuid>,
    pub items: Vec<FulfillmentItemInput>,
}

/// One requested order line
#[derive(Debug, Deserialize)]
pub struct FulfillmentItemInput {
    pub produk_id: Uuid,
    pub jumlah: i32,
    pub notes: Option<String>,
}

/// Input for advancing an order's status
#[derive(Debug, Deserialize)]
pub struct AdvanceStatusInput {
    pub status: String,
}

#[derive(Debug, FromRow)]
struct OrderRow {
    order_id: Uuid,
    order_number: String,
    transaksi_id: Option<Uuid>,
    cashier_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    produk_id: Uuid,
    nama_produk: String,
    jumlah: i32,
    notes: Option<String>,
}

impl FulfillmentService {
    /// Create a new FulfillmentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a fulfillment order in the `waiting` state
    pub async fn create_order(
        &self,
        cashier_id: Uuid,
        input: CreateFulfillmentInput,
    ) -> AppResult<FulfillmentOrder> {
        validate_line_items(&input.items).map_err(|msg| AppError::Validation {
            field: "items".to_string(),
            message: msg.to_string(),
            message_id: "Pesanan harus memiliki minimal 1 item".to_string(),
        })?;
        for item in &input.items {
            validate_item_quantity(item.jumlah).map_err(|msg| AppError::Validation {
                field: "jumlah".to_string(),
                message: msg.to_string(),
                message_id: "Jumlah harus lebih dari 0".to_string(),
            })?;
        }

        // Start transaction
        let mut tx = self.db.begin().await?;

        for item in &input.items {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM products WHERE produk_id = $1)",
            )
            .bind(item.produk_id)
            .fetch_one(&mut *tx)
            .await?;

            if !exists {
                return Err(AppError::ProductNotFound(item.produk_id.to_string()));
            }
        }

        if let Some(transaksi_id) = input.transaksi_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM transactions WHERE transaksi_id = $1)",
            )
            .bind(transaksi_id)
            .fetch_one(&mut *tx)
            .await?;

            if !exists {
                return Err(AppError::NotFound("Transaksi".to_string()));
            }
        }

        // Human-readable sequence number, restarting daily
        let sequence = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) + 1 FROM barista_orders WHERE created_at::date = CURRENT_DATE",
        )
        .fetch_one(&mut *tx)
        .await?;
        let order_number = format!("ORD-{:03}", sequence);

        let order_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO barista_orders (order_number, transaksi_id, cashier_id, status)
            VALUES ($1, $2, $3, $4)
            RETURNING order_id
            "#,
        )
        .bind(&order_number)
        .bind(input.transaksi_id)
        .bind(cashier_id)
        .bind(FulfillmentStatus::Waiting.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for item in &input.items {
            sqlx::query(
                r#"
                INSERT INTO barista_order_items (order_id, produk_id, jumlah, notes)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order_id)
            .bind(item.produk_id)
            .bind(item.jumlah)
            .bind(&item.notes)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_order(order_id).await
    }

    /// Get an order with its line items
    pub async fn get_order(&self, order_id: Uuid) -> AppResult<FulfillmentOrder> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT order_id, order_number, transaksi_id, cashier_id, status,
                   created_at, updated_at
            FROM barista_orders
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Pesanan".to_string()))?;

        let mut orders = self.attach_items(vec![row]).await?;
        Ok(orders.remove(0))
    }

    /// List orders, oldest first, optionally filtered by status
    ///
    /// The special filter `active` selects every order that has not yet
    /// completed.
    pub async fn list_orders(&self, status: Option<String>) -> AppResult<Vec<FulfillmentOrder>> {
        let rows = match status.as_deref() {
            None => {
                sqlx::query_as::<_, OrderRow>(
                    r#"
                    SELECT order_id, order_number, transaksi_id, cashier_id, status,
                           created_at, updated_at
                    FROM barista_orders
                    ORDER BY created_at ASC
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
            Some("active") => {
                sqlx::query_as::<_, OrderRow>(
                    r#"
                    SELECT order_id, order_number, transaksi_id, cashier_id, status,
                           created_at, updated_at
                    FROM barista_orders
                    WHERE status <> $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(FulfillmentStatus::Completed.as_str())
                .fetch_all(&self.db)
                .await?
            }
            Some(raw) => {
                let parsed = FulfillmentStatus::from_str(raw)
                    .ok_or_else(|| AppError::InvalidStatus(raw.to_string()))?;
                sqlx::query_as::<_, OrderRow>(
                    r#"
                    SELECT order_id, order_number, transaksi_id, cashier_id, status,
                           created_at, updated_at
                    FROM barista_orders
                    WHERE status = $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(parsed.as_str())
                .fetch_all(&self.db)
                .await?
            }
        };

        self.attach_items(rows).await
    }

    /// Advance an order to a target status
    ///
    /// The status is written unconditionally; the material deduction is
    /// applied only when this call is the first to move the order into
    /// `completed`. The status check and the deductions commit as one unit,
    /// so concurrent completion requests produce exactly one deduction pass.
    pub async fn advance_status(
        &self,
        order_id: Uuid,
        input: AdvanceStatusInput,
    ) -> AppResult<FulfillmentOrder> {
        let target = FulfillmentStatus::from_str(&input.status)
            .ok_or_else(|| AppError::InvalidStatus(input.status.clone()))?;

        // Start transaction
        let mut tx = self.db.begin().await?;

        let current = sqlx::query_scalar::<_, String>(
            "SELECT status FROM barista_orders WHERE order_id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Pesanan".to_string()))?;

        let current = FulfillmentStatus::from_str(&current).ok_or_else(|| {
            AppError::Internal(format!("Unknown order status in storage: {}", current))
        })?;

        if deducts_stock(current, target) {
            // Per-material consumption implied by the order's recipes
            let usage = sqlx::query_as::<_, (Uuid, Decimal)>(
                r#"
                SELECT pb.bahan_id, SUM(pb.jumlah * boi.jumlah) AS total
                FROM barista_order_items boi
                JOIN produk_bahan pb ON pb.produk_id = boi.produk_id
                WHERE boi.order_id = $1
                GROUP BY pb.bahan_id
                "#,
            )
            .bind(order_id)
            .fetch_all(&mut *tx)
            .await?;

            for (bahan_id, total) in usage {
                MaterialService::apply_adjustment(&mut *tx, bahan_id, -total).await?;
            }
        }

        sqlx::query("UPDATE barista_orders SET status = $1, updated_at = NOW() WHERE order_id = $2")
            .bind(target.as_str())
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_order(order_id).await
    }

    /// Delete an order
    ///
    /// Deleting a completed order does not reverse its stock deduction;
    /// the deduction is a committed effect.
    pub async fn delete_order(&self, order_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM barista_orders WHERE order_id = $1")
            .bind(order_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Pesanan".to_string()));
        }

        Ok(())
    }

    async fn attach_items(&self, rows: Vec<OrderRow>) -> AppResult<Vec<FulfillmentOrder>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.order_id).collect();

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT boi.order_id, boi.produk_id, p.nama_produk, boi.jumlah, boi.notes
            FROM barista_order_items boi
            JOIN products p ON p.produk_id = boi.produk_id
            WHERE boi.order_id = ANY($1)
            ORDER BY p.nama_produk ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let status = FulfillmentStatus::from_str(&row.status).ok_or_else(|| {
                AppError::Internal(format!("Unknown order status in storage: {}", row.status))
            })?;
            orders.push(FulfillmentOrder {
                order_id: row.order_id,
                order_number: row.order_number,
                transaksi_id: row.transaksi_id,
                cashier_id: row.cashier_id,
                status,
                items: Vec::new(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            });
        }

        for item in item_rows {
            if let Some(order) = orders.iter_mut().find(|o| o.order_id == item.order_id) {
                order.items.push(FulfillmentItem {
                    produk_id: item.produk_id,
                    nama_produk: item.nama_produk,
                    jumlah: item.jumlah,
                    notes: item.notes,
                });
            }
        }

        Ok(orders)
    }
}
