use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_products::ProductError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::payment::PaymentError;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Tax and shipping fee are required")]
    MissingCharges,

    #[error("Product with id {0} not found")]
    ProductNotFound(Uuid),

    #[error("Order with id {0} not found")]
    OrderNotFound(Uuid),

    #[error("User has no orders")]
    NoOrders,

    #[error("Unauthorized to access this route")]
    Forbidden,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Payment gateway error: {0}")]
    PaymentGateway(#[from] PaymentError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyCart | OrderError::MissingCharges | OrderError::InvalidInput(_) => {
                AppError::BadRequest(err.to_string())
            }
            OrderError::ProductNotFound(_) | OrderError::OrderNotFound(_) | OrderError::NoOrders => {
                AppError::NotFound(err.to_string())
            }
            OrderError::Forbidden => AppError::Forbidden(err.to_string()),
            OrderError::Validation(errors) => AppError::ValidationError(errors),
            OrderError::PaymentGateway(e) => AppError::ServiceUnavailable(e.to_string()),
            OrderError::Database(msg) => AppError::Database(msg),
            OrderError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for OrderError {
    fn from(err: mongodb::error::Error) -> Self {
        OrderError::Database(err.to_string())
    }
}

/// Catalog lookups only fail on storage errors; a missing product is a
/// `None`, which the service maps to `ProductNotFound`.
impl From<ProductError> for OrderError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => OrderError::ProductNotFound(id),
            ProductError::Database(msg) => OrderError::Database(msg),
            ProductError::InvalidInput(errors) => OrderError::Validation(errors),
        }
    }
}
