use async_trait::async_trait;
use product_catalog::{ObjectId, Product, ProductRepository, StoreError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Insertion-ordered in-memory collection standing in for the document store.
#[derive(Default)]
pub struct InMemoryProductStore {
    records: RwLock<Vec<(ObjectId, Product)>>,
}

impl InMemoryProductStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().map(|(_, p)| p.clone()).collect())
    }

    async fn get_by_id(&self, id: &ObjectId) -> Result<Option<Product>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|(k, _)| k == id).map(|(_, p)| p.clone()))
    }

    async fn create(&self, product: Product) -> Result<Product, StoreError> {
        let id = ObjectId::new();
        let stored = product.with_id(id.to_hex());
        self.records.write().await.push((id, stored.clone()));
        Ok(stored)
    }

    async fn update(&self, id: &ObjectId, product: Product) -> Result<Option<Product>, StoreError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|(k, _)| k == id) {
            Some((_, slot)) => {
                *slot = product.with_id(id.to_hex());
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|(k, _)| k != id);
        Ok(records.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Every operation fails as if the store were unreachable.
#[derive(Default)]
pub struct UnreachableProductStore {
    pub calls: AtomicUsize,
}

impl UnreachableProductStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl ProductRepository for UnreachableProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        self.fail()
    }

    async fn get_by_id(&self, _id: &ObjectId) -> Result<Option<Product>, StoreError> {
        self.fail()
    }

    async fn create(&self, _product: Product) -> Result<Product, StoreError> {
        self.fail()
    }

    async fn update(&self, _id: &ObjectId, _product: Product) -> Result<Option<Product>, StoreError> {
        self.fail()
    }

    async fn delete(&self, _id: &ObjectId) -> Result<bool, StoreError> {
        self.fail()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.fail()
    }
}
