//! API Module
//!
//! HTTP handlers and routing for the product catalog REST API.
//!
//! # Endpoints
//! - `GET /api/products/all` - List every product
//! - `GET /api/products/:id` - Fetch one product
//! - `PUT /api/products/:id` - Replace one product
//! - `DELETE /api/products/:id` - Delete one product
//! - `GET /stats` - Cache hit/miss counters
//! - `GET /health` - Health check endpoint

pub mod errors;
pub mod handlers;
pub mod routes;

pub use errors::{ApiError, Operation};
pub use handlers::*;
pub use routes::create_router;
