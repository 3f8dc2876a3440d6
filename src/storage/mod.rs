//! Persistence for products.

pub mod memory;
pub mod postgres;

pub use memory::MemoryProductRepository;
pub use postgres::PostgresProductRepository;

use crate::domain::product::{NewProduct, Product, ProductChanges};
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// CRUD primitives over durable product storage.
///
/// Implementations own all product state; callers never cache what they read.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Ensures the backing schema exists. Called once at startup.
    async fn sync(&self) -> StorageResult<()>;

    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> StorageResult<()>;

    /// All products ordered by id ascending.
    async fn find_all(&self) -> StorageResult<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Product>>;

    /// Inserts a product with a fresh id and `availability = true`.
    async fn create(&self, fields: NewProduct) -> StorageResult<Product>;

    /// Overwrites every mutable field of `product` and returns the stored row, or `None`
    /// when the row no longer exists.
    async fn update(
        &self,
        product: &Product,
        changes: ProductChanges,
    ) -> StorageResult<Option<Product>>;

    /// Physically removes `product`.
    async fn destroy(&self, product: &Product) -> StorageResult<()>;
}
