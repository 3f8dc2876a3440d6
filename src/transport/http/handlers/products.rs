use crate::domain::validation::{self, PathId};
use crate::transport::http::error::{ApiError, ApiResult};
use crate::transport::http::extract::JsonBody;
use crate::transport::http::types::{
    AppState, DeletedResponse, ProductListResponse, ProductResponse, DELETED_MESSAGE,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

// Well-formed ids too large for storage address nothing.
fn stored_key(id: PathId) -> ApiResult<i64> {
    id.key().ok_or(ApiError::NotFound)
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Products ordered by id", body = ProductListResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<ProductListResponse>> {
    let data = state.products.list().await?;
    Ok(Json(ProductListResponse { data }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "The ID of the product to retrieve")
    ),
    responses(
        (status = 200, description = "Successful response", body = ProductResponse),
        (status = 400, description = "Bad request, invalid ID", body = crate::transport::http::types::ValidationErrorResponse),
        (status = 404, description = "Product not found", body = crate::transport::http::types::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductResponse>> {
    let id = stored_key(validation::validate_id(&id)?)?;
    let data = state.products.get(id).await?;
    Ok(Json(ProductResponse { data }))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = crate::transport::http::types::CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Bad request, invalid input data", body = crate::transport::http::types::ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    let fields = validation::validate_create(&body)?;
    let data = state.products.create(fields).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse { data })))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "The ID of the product to replace")
    ),
    request_body = crate::transport::http::types::UpdateProductRequest,
    responses(
        (status = 200, description = "Product replaced", body = ProductResponse),
        (status = 400, description = "Bad request, invalid ID or input data", body = crate::transport::http::types::ValidationErrorResponse),
        (status = 404, description = "Product not found", body = crate::transport::http::types::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<ProductResponse>> {
    let (id, changes) = validation::validate_replace(&id, &body)?;
    let data = state.products.replace(stored_key(id)?, changes).await?;
    Ok(Json(ProductResponse { data }))
}

/// The request body, if any, is never read.
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "The ID of the product to toggle")
    ),
    responses(
        (status = 200, description = "Availability flipped", body = ProductResponse),
        (status = 400, description = "Bad request, invalid ID", body = crate::transport::http::types::ValidationErrorResponse),
        (status = 404, description = "Product not found", body = crate::transport::http::types::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn toggle_availability_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductResponse>> {
    let id = stored_key(validation::validate_id(&id)?)?;
    let data = state.products.toggle_availability(id).await?;
    Ok(Json(ProductResponse { data }))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "The ID of the product to delete")
    ),
    responses(
        (status = 200, description = "Confirmation message", body = DeletedResponse),
        (status = 400, description = "Bad request, invalid ID", body = crate::transport::http::types::ValidationErrorResponse),
        (status = 404, description = "Product not found", body = crate::transport::http::types::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::transport::http::types::ErrorResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletedResponse>> {
    let id = stored_key(validation::validate_id(&id)?)?;
    state.products.delete(id).await?;
    Ok(Json(DeletedResponse {
        data: DELETED_MESSAGE.to_string(),
    }))
}
