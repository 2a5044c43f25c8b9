//! Product Cache - product catalog service with a cache-aside distributed cache
//!
//! Serves CRUD operations over products held in a relational store, with a
//! distributed cache in front of reads.

pub mod api;
pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::CatalogError;
pub use service::ProductCatalog;
pub use tasks::spawn_cleanup_task;
