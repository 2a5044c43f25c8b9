//! API Handlers
//!
//! HTTP request handlers mapping catalog calls to responses.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::errors::{ApiError, Operation};
use crate::models::{HealthResponse, Product, StatsResponse};
use crate::service::ProductCatalog;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside orchestrator
    pub catalog: Arc<ProductCatalog>,
}

impl AppState {
    /// Creates a new AppState around the given catalog.
    pub fn new(catalog: ProductCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Handler for GET /api/products/all
pub async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .catalog
        .list_all()
        .await
        .map_err(ApiError::during(Operation::ListProducts))?;

    Ok(Json(products))
}

/// Handler for GET /api/products/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .catalog
        .get_by_id(id)
        .await
        .map_err(ApiError::during(Operation::GetProduct))?;

    Ok(Json(product))
}

/// Handler for PUT /api/products/:id
///
/// The body is the full replacement product and must carry the path id.
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(product): Json<Product>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog
        .update(id, product)
        .await
        .map_err(ApiError::during(Operation::UpdateProduct))?;

    Ok(StatusCode::OK)
}

/// Handler for DELETE /api/products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .catalog
        .delete(id)
        .await
        .map_err(ApiError::during(Operation::DeleteProduct))?;

    Ok(StatusCode::OK)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.catalog.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
