//! Sales transaction models
//!
//! Transactions are immutable once created: line prices are captured from
//! the catalog at creation time and never recomputed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted sales transaction with its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaksi_id: Uuid,
    pub user_id: Uuid,
    /// Sum of line subtotals, in whole rupiah
    pub total_harga: i64,
    pub tanggal: DateTime<Utc>,
    pub items: Vec<TransactionItem>,
}

/// One immutable line of a sales transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionItem {
    pub produk_id: Uuid,
    pub nama_produk: String,
    /// Catalog price at the time of sale, in whole rupiah
    pub harga_satuan: i64,
    pub jumlah: i32,
    pub subtotal: i64,
}

/// Compute a transaction total from its line items
pub fn transaction_total(items: &[TransactionItem]) -> i64 {
    items.iter().map(|item| item.subtotal).sum()
}

/// Compute a line subtotal from a unit price and quantity
pub fn line_subtotal(harga_satuan: i64, jumlah: i32) -> i64 {
    harga_satuan * i64::from(jumlah)
}
