//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the database repositories and the image stores.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `mysql` - MySQL database support via SeaORM

pub mod database;
pub mod images;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use images::{FsImageStore, InMemoryImageStore};

// Re-exports - MySQL
#[cfg(feature = "mysql")]
pub use database::{DatabaseConnections, MySqlPostRepository};
