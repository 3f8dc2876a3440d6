//! The one place where failures become HTTP responses.

use crate::app::product_service::ServiceError;
use crate::domain::validation::ValidationErrors;
use crate::storage::StorageError;
use crate::transport::http::types::{ErrorResponse, ValidationErrorResponse, NOT_FOUND_MESSAGE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("product not found")]
    NotFound,

    #[error("invalid JSON body: {0}")]
    MalformedBody(String),

    #[error("internal error: {0}")]
    Internal(#[from] StorageError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Storage(e) => ApiError::Internal(e),
        }
    }
}

fn error_body(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: error.into() })).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    errors: errors.into_inner(),
                }),
            )
                .into_response(),
            ApiError::NotFound => error_body(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            ApiError::MalformedBody(reason) => error_body(
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON body: {}", reason),
            ),
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "persistence failure");
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::validate_id;

    #[test]
    fn status_codes_follow_the_error_kind() {
        let validation = ApiError::from(validate_id("x").unwrap_err());
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MalformedBody("eof".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        let internal = ApiError::Internal(StorageError::Unavailable("down".to_string()));
        assert_eq!(
            internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn service_not_found_maps_to_not_found() {
        assert!(matches!(
            ApiError::from(ServiceError::NotFound(3)),
            ApiError::NotFound
        ));
    }
}
