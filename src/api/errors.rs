//! HTTP error adapter
//!
//! The only place where catalog failures become status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::error::CatalogError;
use crate::models::ErrorResponse;

/// Catalog operation a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListProducts,
    GetProduct,
    UpdateProduct,
    DeleteProduct,
}

impl Operation {
    /// Summary returned to clients when a backend fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::ListProducts => "An error occurred while retrieving products.",
            Operation::GetProduct => "An error occurred while retrieving the product.",
            Operation::UpdateProduct => "An error occurred while updating the product.",
            Operation::DeleteProduct => "An error occurred while deleting the product.",
        }
    }
}

/// A catalog failure tagged with the operation it came from.
#[derive(Debug)]
pub struct ApiError {
    operation: Operation,
    source: CatalogError,
}

impl ApiError {
    pub fn new(operation: Operation, source: CatalogError) -> Self {
        Self { operation, source }
    }

    /// Adapter for `map_err`.
    pub fn during(operation: Operation) -> impl Fn(CatalogError) -> Self {
        move |source| Self::new(operation, source)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.source {
            CatalogError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(self.source.to_string()),
            ),
            CatalogError::IdMismatch { .. } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(self.source.to_string()),
            ),
            CatalogError::Cache(_) | CatalogError::Store(_) | CatalogError::Codec(_) => {
                error!(
                    operation = ?self.operation,
                    error = %self.source,
                    "Catalog operation failed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(
                        self.operation.failure_message(),
                        self.source.to_string(),
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
