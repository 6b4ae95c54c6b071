//! Product document store on PostgreSQL.
//!
//! Each product is one JSONB document keyed by its ObjectId hex string. `seq`
//! preserves insertion order for listing.

use crate::domain::{ObjectId, Product};
use crate::storage::{ProductRepository, StoreError};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::{debug, info};

const CREATE_PRODUCTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS products (
    seq BIGSERIAL,
    id TEXT PRIMARY KEY,
    document JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

#[derive(Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    /// Connects, then makes sure the `products` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    pub async fn new_with_pool(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_PRODUCTS_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    /// Removes every document. Used by the live integration test.
    pub async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM products").execute(&self.pool).await?;
        Ok(())
    }
}

/// The stored document never carries the id; it lives in its own column.
fn to_document(mut product: Product) -> Result<JsonValue, StoreError> {
    product.id = None;
    Ok(serde_json::to_value(product)?)
}

fn from_row(row: &sqlx::postgres::PgRow) -> Result<Product, StoreError> {
    let id: String = row.try_get("id")?;
    let document: JsonValue = row.try_get("document")?;
    let product: Product = serde_json::from_value(document)?;
    Ok(product.with_id(id))
}

#[async_trait]
impl ProductRepository for PostgresProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query("SELECT id, document FROM products ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(from_row).collect()
    }

    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query("SELECT id, document FROM products WHERE id = $1")
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(from_row).transpose()
    }

    async fn create(&self, product: Product) -> Result<Product, StoreError> {
        let id = ObjectId::new();
        let document = to_document(product.clone())?;
        sqlx::query("INSERT INTO products (id, document) VALUES ($1, $2)")
            .bind(id.to_hex())
            .bind(&document)
            .execute(&self.pool)
            .await?;
        info!(product_id = %id, "inserted product document");
        Ok(product.with_id(id.to_hex()))
    }

    async fn update(&self, id: &ObjectId, product: Product) -> Result<Option<Product>, StoreError> {
        let document = to_document(product.clone())?;
        let result =
            sqlx::query("UPDATE products SET document = $2, updated_at = now() WHERE id = $1")
                .bind(id.to_hex())
                .bind(&document)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            debug!(product_id = %id, "replace matched no document");
            return Ok(None);
        }
        info!(product_id = %id, "replaced product document");
        Ok(Some(product.with_id(id.to_hex())))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.to_hex())
            .execute(&self.pool)
            .await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(product_id = %id, "deleted product document");
        }
        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
