//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MaterialUnit;

/// A sellable product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub produk_id: Uuid,
    pub nama_produk: String,
    /// Unit price in whole rupiah
    pub harga: i64,
    pub deskripsi: Option<String>,
    pub jenis_produk: ProductCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    #[serde(rename = "Kopi")]
    Kopi,
    #[serde(rename = "Non-Kopi")]
    NonKopi,
    #[serde(rename = "Makanan")]
    Makanan,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Kopi => "Kopi",
            ProductCategory::NonKopi => "Non-Kopi",
            ProductCategory::Makanan => "Makanan",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Kopi" => Some(ProductCategory::Kopi),
            "Non-Kopi" => Some(ProductCategory::NonKopi),
            "Makanan" => Some(ProductCategory::Makanan),
            _ => None,
        }
    }
}

/// One line of a product's bill of materials: how much of a material one
/// unit of the product consumes when fulfilled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLine {
    pub bahan_id: Uuid,
    pub nama_bahan: String,
    pub jumlah: Decimal,
    pub satuan: MaterialUnit,
}
