//! In-process product storage.
//!
//! Used as the substitute collaborator in tests: it counts every call it receives and can
//! be switched into a failing mode to simulate an unreachable database.

use crate::domain::product::{NewProduct, Product, ProductChanges};
use crate::storage::{ProductRepository, StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryProductRepository {
    table: RwLock<Table>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository calls made so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// When set, every call fails with [`StorageError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn enter(&self) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "in-memory store is in failing mode".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn sync(&self) -> StorageResult<()> {
        self.enter()
    }

    async fn ping(&self) -> StorageResult<()> {
        self.enter()
    }

    async fn find_all(&self) -> StorageResult<Vec<Product>> {
        self.enter()?;
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Product>> {
        self.enter()?;
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, fields: NewProduct) -> StorageResult<Product> {
        self.enter()?;
        let mut table = self.table.write().await;
        table.last_id += 1;
        let product = Product {
            id: table.last_id,
            name: fields.name,
            price: fields.price,
            availability: true,
        };
        table.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        product: &Product,
        changes: ProductChanges,
    ) -> StorageResult<Option<Product>> {
        self.enter()?;
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&product.id).map(|row| {
            row.name = changes.name;
            row.price = changes.price;
            row.availability = changes.availability;
            row.clone()
        }))
    }

    async fn destroy(&self, product: &Product) -> StorageResult<()> {
        self.enter()?;
        let mut table = self.table.write().await;
        table.rows.remove(&product.id);
        Ok(())
    }
}
