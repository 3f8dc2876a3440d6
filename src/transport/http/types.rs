use crate::app::product_service::ProductService;
use crate::domain::product::Product;
use crate::domain::validation::FieldError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Returned with 404 by every route that addresses a single product.
pub const NOT_FOUND_MESSAGE: &str = "Producto no encontrado";
/// Returned as `data` by a successful delete.
pub const DELETED_MESSAGE: &str = "Producto Eliminado";

#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ProductResponse {
    pub data: Product,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Producto Eliminado")]
    pub data: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Producto no encontrado")]
    pub error: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ValidationErrorResponse {
    /// Failed rules, path id first, then body fields in declaration order.
    pub errors: Vec<FieldError>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Documented body of `POST /api/products`. The handler reads the raw JSON so that
/// malformed fields are reported by the validator rather than by deserialization.
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Tablet Samsung S9")]
    pub name: String,
    #[schema(example = 800)]
    pub price: f64,
}

/// Documented body of `PUT /api/products/{id}`.
#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct UpdateProductRequest {
    #[schema(example = "Tablet Samsung S9 - Actualizado")]
    pub name: String,
    #[schema(example = 800)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}
