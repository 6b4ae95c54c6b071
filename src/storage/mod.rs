//! Persistence boundary for products.
//!
//! [`ProductRepository`] is the only capability handlers hold; [`PostgresProductStore`]
//! is the document-store implementation used by the binaries.

use crate::domain::{ObjectId, Product};
use async_trait::async_trait;
use thiserror::Error;

pub mod postgres;

pub use postgres::PostgresProductStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("Malformed product document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Narrow CRUD capability over the product collection.
///
/// Absence is never an error: lookups return `None`, deletes return `false`.
/// Every `Err` is a storage failure.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in insertion order.
    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<Product>, StoreError>;

    /// Assigns a fresh identifier, persists, and returns the stored record.
    async fn create(&self, product: Product) -> Result<Product, StoreError>;

    /// Full replacement of the record at `id`. Never upserts.
    async fn update(&self, id: &ObjectId, product: Product) -> Result<Option<Product>, StoreError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError>;

    /// Liveness probe for `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
