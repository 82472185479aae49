//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - Schema bootstrap for the `users` table
//! - `UserRepository` implementation

pub mod connection;
pub mod mysql;
pub mod schema;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::MySqlUserRepository;
