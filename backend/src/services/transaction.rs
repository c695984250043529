//! Sales transaction recorder
//!
//! A transaction is re-priced from the catalog at creation time and
//! persisted atomically: the header and every line item commit together or
//! not at all. Transactions never touch material stock; consumption happens
//! when the derived fulfillment order completes.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{line_subtotal, Transaction, TransactionItem, UserStatus};
use shared::validation::{validate_item_quantity, validate_line_items};

/// Sales transaction service
#[derive(Clone)]
pub struct TransactionService {
    db: PgPool,
}

/// Input for creating a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionInput {
    pub items: Vec<TransactionItemInput>,
}

/// One requested line: the price is never taken from the caller
#[derive(Debug, Deserialize)]
pub struct TransactionItemInput {
    pub produk_id: Uuid,
    pub jumlah: i32,
}

#[derive(Debug, FromRow)]
struct TransactionHeaderRow {
    transaksi_id: Uuid,
    user_id: Uuid,
    total_harga: i64,
    tanggal: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct TransactionItemRow {
    transaksi_id: Uuid,
    produk_id: Uuid,
    nama_produk: String,
    harga_satuan: i64,
    jumlah: i32,
    subtotal: i64,
}

impl TransactionService {
    /// Create a new TransactionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a sale
    ///
    /// Every line is priced from the catalog inside the same database
    /// transaction that persists the record; an unknown product aborts the
    /// whole call and nothing is written.
    pub async fn create_transaction(
        &self,
        user_id: Uuid,
        input: CreateTransactionInput,
    ) -> AppResult<Transaction> {
        validate_line_items(&input.items).map_err(|msg| AppError::Validation {
            field: "items".to_string(),
            message: msg.to_string(),
            message_id: "Transaksi harus memiliki minimal 1 item".to_string(),
        })?;
        for item in &input.items {
            validate_item_quantity(item.jumlah).map_err(|msg| AppError::Validation {
                field: "jumlah".to_string(),
                message: msg.to_string(),
                message_id: "Jumlah harus lebih dari 0".to_string(),
            })?;
        }

        // The issuing cashier must resolve to an active account
        let user_status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        match user_status {
            Some(status) if status == UserStatus::Aktif.as_str() => {}
            _ => return Err(AppError::InvalidUser(user_id.to_string())),
        }

        // Start transaction
        let mut tx = self.db.begin().await?;

        let mut items = Vec::with_capacity(input.items.len());
        let mut total_harga: i64 = 0;

        for line in &input.items {
            let priced = sqlx::query_as::<_, (String, i64)>(
                "SELECT nama_produk, harga FROM products WHERE produk_id = $1",
            )
            .bind(line.produk_id)
            .fetch_optional(&mut *tx)
            .await?;

            let (nama_produk, harga_satuan) =
                priced.ok_or_else(|| AppError::ProductNotFound(line.produk_id.to_string()))?;

            let subtotal = line_subtotal(harga_satuan, line.jumlah);
            total_harga += subtotal;

            items.push(TransactionItem {
                produk_id: line.produk_id,
                nama_produk,
                harga_satuan,
                jumlah: line.jumlah,
                subtotal,
            });
        }

        let header = sqlx::query_as::<_, TransactionHeaderRow>(
            r#"
            INSERT INTO transactions (user_id, total_harga)
            VALUES ($1, $2)
            RETURNING transaksi_id, user_id, total_harga, tanggal
            "#,
        )
        .bind(user_id)
        .bind(total_harga)
        .fetch_one(&mut *tx)
        .await?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO transaction_items (transaksi_id, produk_id, jumlah, harga_satuan, subtotal)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(header.transaksi_id)
            .bind(item.produk_id)
            .bind(item.jumlah)
            .bind(item.harga_satuan)
            .bind(item.subtotal)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Transaction {
            transaksi_id: header.transaksi_id,
            user_id: header.user_id,
            total_harga: header.total_harga,
            tanggal: header.tanggal,
            items,
        })
    }

    /// Get a transaction with its line items
    pub async fn get_transaction(&self, transaksi_id: Uuid) -> AppResult<Transaction> {
        let header = sqlx::query_as::<_, TransactionHeaderRow>(
            "SELECT transaksi_id, user_id, total_harga, tanggal FROM transactions WHERE transaksi_id = $1",
        )
        .bind(transaksi_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaksi".to_string()))?;

        let mut transactions = self.attach_items(vec![header]).await?;
        Ok(transactions.remove(0))
    }

    /// List all transactions, newest first
    pub async fn list_transactions(&self) -> AppResult<Vec<Transaction>> {
        let headers = sqlx::query_as::<_, TransactionHeaderRow>(
            "SELECT transaksi_id, user_id, total_harga, tanggal FROM transactions ORDER BY tanggal DESC",
        )
        .fetch_all(&self.db)
        .await?;

        self.attach_items(headers).await
    }

    async fn attach_items(
        &self,
        headers: Vec<TransactionHeaderRow>,
    ) -> AppResult<Vec<Transaction>> {
        let ids: Vec<Uuid> = headers.iter().map(|h| h.transaksi_id).collect();

        let item_rows = sqlx::query_as::<_, TransactionItemRow>(
            r#"
            SELECT ti.transaksi_id, ti.produk_id, p.nama_produk, ti.harga_satuan,
                   ti.jumlah, ti.subtotal
            FROM transaction_items ti
            JOIN products p ON p.produk_id = ti.produk_id
            WHERE ti.transaksi_id = ANY($1)
            ORDER BY p.nama_produk ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        let mut transactions: Vec<Transaction> = headers
            .into_iter()
            .map(|h| Transaction {
                transaksi_id: h.transaksi_id,
                user_id: h.user_id,
                total_harga: h.total_harga,
                tanggal: h.tanggal,
                items: Vec::new(),
            })
            .collect();

        for row in item_rows {
            if let Some(t) = transactions
                .iter_mut()
                .find(|t| t.transaksi_id == row.transaksi_id)
            {
                t.items.push(TransactionItem {
                    produk_id: row.produk_id,
                    nama_produk: row.nama_produk,
                    harga_satuan: row.harga_satuan,
                    jumlah: row.jumlah,
                    subtotal: row.subtotal,
                });
            }
        }

        Ok(transactions)
    }
}
