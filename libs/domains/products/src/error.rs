use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid product: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Product with id: {0} not found.")]
    NotFound(i64),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductError::Storage(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
