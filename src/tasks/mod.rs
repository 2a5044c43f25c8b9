//! Background Tasks Module
//!
//! # Tasks
//! - Cache cleanup: purges expired in-memory cache entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
