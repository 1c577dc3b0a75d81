//! # authgate-database
//!
//! PostgreSQL connection management and concrete repositories for the
//! token and user tables.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{TokenRepository, UserRepository};
