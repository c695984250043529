//! Product catalog lookups
//!
//! The catalog itself is managed elsewhere; this service is the read-only
//! pricing source consumed by the sales transaction recorder.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Product, ProductCategory};

/// Read-only product catalog service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    produk_id: Uuid,
    nama_produk: String,
    harga: i64,
    deskripsi: Option<String>,
    jenis_produk: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> AppResult<Product> {
        let jenis_produk = ProductCategory::from_str(&self.jenis_produk).ok_or_else(|| {
            AppError::Internal(format!(
                "Unknown product category in storage: {}",
                self.jenis_produk
            ))
        })?;
        Ok(Product {
            produk_id: self.produk_id,
            nama_produk: self.nama_produk,
            harga: self.harga,
            deskripsi: self.deskripsi,
            jenis_produk,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get product by ID
    pub async fn get_product(&self, produk_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT produk_id, nama_produk, harga, deskripsi, jenis_produk,
                   created_at, updated_at
            FROM products
            WHERE produk_id = $1
            "#,
        )
        .bind(produk_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Produk".to_string()))?;

        row.into_product()
    }

    /// List all products
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT produk_id, nama_produk, harga, deskripsi, jenis_produk,
                   created_at, updated_at
            FROM products
            ORDER BY nama_produk ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }
}
