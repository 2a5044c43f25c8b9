//! Service Module
//!
//! The cache-aside orchestrator sitting between the HTTP handlers and the
//! cache and store backends.

mod catalog;
mod stats;


pub use catalog::ProductCatalog;
pub use stats::{CatalogStats, StatsSnapshot};
