//! # givehub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for all GiveHub entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
