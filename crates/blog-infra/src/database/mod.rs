//! Post persistence: MySQL via SeaORM, plus an in-memory fallback.

mod connections;
mod memory;

#[cfg(feature = "mysql")]
pub mod entity;
#[cfg(feature = "mysql")]
mod mysql_repo;

pub use connections::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "mysql")]
pub use connections::DatabaseConnections;
#[cfg(feature = "mysql")]
pub use mysql_repo::MySqlPostRepository;
