use crate::domain::product::Product;
use crate::domain::validation::{FieldError, Location};
use crate::transport::http::handlers::{health, products};
use crate::transport::http::middleware::{cors_layer, request_logger};
use crate::transport::http::types::{
    AppState, CreateProductRequest, DeletedResponse, ErrorResponse, HealthResponse,
    ProductListResponse, ProductResponse, UpdateProductRequest, ValidationErrorResponse,
};
use anyhow::Context;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const SWAGGER_UI_PATH: &str = "/docs";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products REST API",
        version = "1.0",
        description = "API Docs for Products"
    ),
    paths(
        health::healthcheck_handler,
        products::list_products_handler,
        products::get_product_handler,
        products::create_product_handler,
        products::update_product_handler,
        products::toggle_availability_handler,
        products::delete_product_handler
    ),
    components(schemas(
        Product,
        ProductResponse,
        ProductListResponse,
        DeletedResponse,
        ErrorResponse,
        ValidationErrorResponse,
        FieldError,
        Location,
        CreateProductRequest,
        UpdateProductRequest,
        HealthResponse
    )),
    tags(
        (name = "Products", description = "API operations related to products")
    )
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            "/api/products/:id",
            get(products::get_product_handler)
                .put(products::update_product_handler)
                .patch(products::toggle_availability_handler)
                .delete(products::delete_product_handler),
        )
        .with_state(app_state)
}

/// The full application: routes, Swagger UI, request logging and CORS.
pub fn create_app(app_state: AppState, frontend_url: Option<&str>) -> anyhow::Result<Router> {
    let cors = cors_layer(frontend_url)
        .with_context(|| format!("FRONTEND_URL is not a valid origin: {:?}", frontend_url))?;

    Ok(create_router(app_state)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(middleware::from_fn(request_logger))
        .layer(cors))
}
