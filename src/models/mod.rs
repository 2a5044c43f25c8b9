//! Domain entity and response models for the catalog API
//!
//! `Product` doubles as the request body for updates; the remaining types are
//! DTOs for serializing HTTP response bodies.

pub mod product;
pub mod responses;

// Re-export commonly used types
pub use product::Product;
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
