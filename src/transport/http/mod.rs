pub mod error;
pub mod extract;
pub mod middleware;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod health;
    pub mod products;
}

pub use error::{ApiError, ApiResult};
pub use router::{create_app, create_router, ApiDoc};
pub use types::AppState;
