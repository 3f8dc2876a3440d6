//! Product storage on PostgreSQL.

use crate::domain::product::{NewProduct, Product, ProductChanges};
use crate::storage::{ProductRepository, StorageResult};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS products (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    price DOUBLE PRECISION NOT NULL CHECK (price > 0),
    availability BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

// Timestamps stay in the table; every read projects them out.
const PRODUCT_COLUMNS: &str = "id, name, price, availability";

/// A product repository backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn count(&self) -> StorageResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn sync(&self) -> StorageResult<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_all(&self) -> StorageResult<Vec<Product>> {
        let sql = format!("SELECT {} FROM products ORDER BY id ASC", PRODUCT_COLUMNS);
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn create(&self, fields: NewProduct) -> StorageResult<Product> {
        let sql = format!(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING {}",
            PRODUCT_COLUMNS
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(&fields.name)
            .bind(fields.price)
            .fetch_one(&self.pool)
            .await?;
        Ok(product)
    }

    async fn update(
        &self,
        product: &Product,
        changes: ProductChanges,
    ) -> StorageResult<Option<Product>> {
        let sql = format!(
            "UPDATE products
             SET name = $2, price = $3, availability = $4, updated_at = now()
             WHERE id = $1
             RETURNING {}",
            PRODUCT_COLUMNS
        );
        let updated = sqlx::query_as::<_, Product>(&sql)
            .bind(product.id)
            .bind(&changes.name)
            .bind(changes.price)
            .bind(changes.availability)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn destroy(&self, product: &Product) -> StorageResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
