pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::product_service::{ProductService, ServiceError};
pub use domain::product::{NewProduct, Product, ProductChanges};
pub use infra::config::AppConfig;
pub use storage::{MemoryProductRepository, PostgresProductRepository, ProductRepository};
