//! Fulfillment (barista) and procurement (pengadaan) order models
//!
//! Both order kinds carry a single status column that doubles as the
//! idempotency witness for their terminal side effect: material stock is
//! deducted on the first transition into `completed`, and incremented on
//! the first transition into `Diterima`. The guards here are the pure form
//! of that rule.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MaterialUnit;

/// Lifecycle of a barista fulfillment order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentStatus {
    Waiting,
    Processing,
    Ready,
    Completed,
}

impl FulfillmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentStatus::Waiting => "waiting",
            FulfillmentStatus::Processing => "processing",
            FulfillmentStatus::Ready => "ready",
            FulfillmentStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(FulfillmentStatus::Waiting),
            "processing" => Some(FulfillmentStatus::Processing),
            "ready" => Some(FulfillmentStatus::Ready),
            "completed" => Some(FulfillmentStatus::Completed),
            _ => None,
        }
    }
}

/// Whether a status transition triggers the recipe-driven stock deduction
///
/// True exactly when the destination is `completed` and the order is not
/// already completed. Repeating the completion request is a success but
/// must not deduct again.
pub fn deducts_stock(current: FulfillmentStatus, target: FulfillmentStatus) -> bool {
    target == FulfillmentStatus::Completed && current != FulfillmentStatus::Completed
}

/// A barista fulfillment order with its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentOrder {
    pub order_id: Uuid,
    pub order_number: String,
    pub transaksi_id: Option<Uuid>,
    pub cashier_id: Uuid,
    pub status: FulfillmentStatus,
    pub items: Vec<FulfillmentItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of a fulfillment order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentItem {
    pub produk_id: Uuid,
    pub nama_produk: String,
    pub jumlah: i32,
    pub notes: Option<String>,
}

/// Lifecycle of a material procurement order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcurementStatus {
    Pending,
    Dikirim,
    Diterima,
}

impl ProcurementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcurementStatus::Pending => "Pending",
            ProcurementStatus::Dikirim => "Dikirim",
            ProcurementStatus::Diterima => "Diterima",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(ProcurementStatus::Pending),
            "Dikirim" => Some(ProcurementStatus::Dikirim),
            "Diterima" => Some(ProcurementStatus::Diterima),
            _ => None,
        }
    }
}

/// Whether a status transition triggers the stock increment
///
/// True exactly when the destination is `Diterima` and the order has not
/// already been received.
pub fn receives_stock(current: ProcurementStatus, target: ProcurementStatus) -> bool {
    target == ProcurementStatus::Diterima && current != ProcurementStatus::Diterima
}

/// A material procurement order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementOrder {
    pub pengadaan_id: Uuid,
    pub bahan_id: Uuid,
    pub nama_bahan: String,
    pub satuan: MaterialUnit,
    pub user_id: Uuid,
    pub jumlah: Decimal,
    pub tanggal_pesan: NaiveDate,
    pub status: ProcurementStatus,
    pub tanggal_terima: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
