//! The product handler set.
//!
//! Each operation takes already-validated input, performs one lookup and at most one
//! mutation against the repository, and returns either the resulting product or a
//! [`ServiceError`]. Not-found is decided here, before any mutation is attempted.

use crate::domain::product::{NewProduct, Product, ProductChanges};
use crate::storage::{ProductRepository, StorageError};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("product {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn ProductRepository> {
        &self.repository
    }

    pub async fn list(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn create(&self, fields: NewProduct) -> ServiceResult<Product> {
        let product = self.repository.create(fields).await?;
        tracing::debug!(id = product.id, "product created");
        Ok(product)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Overwrites name, price and availability.
    pub async fn replace(&self, id: i64, changes: ProductChanges) -> ServiceResult<Product> {
        let current = self.get(id).await?;
        let updated = self.store(&current, changes).await?;
        tracing::debug!(id, "product replaced");
        Ok(updated)
    }

    /// Flips the stored availability. Nothing else changes.
    pub async fn toggle_availability(&self, id: i64) -> ServiceResult<Product> {
        let current = self.get(id).await?;
        let changes = ProductChanges::toggled_availability(&current);
        let updated = self.store(&current, changes).await?;
        tracing::debug!(id, availability = updated.availability, "availability toggled");
        Ok(updated)
    }

    // A row removed between lookup and write is reported as missing.
    async fn store(&self, current: &Product, changes: ProductChanges) -> ServiceResult<Product> {
        self.repository
            .update(current, changes)
            .await?
            .ok_or(ServiceError::NotFound(current.id))
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        let current = self.get(id).await?;
        self.repository.destroy(&current).await?;
        tracing::debug!(id, "product deleted");
        Ok(())
    }
}
