// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema initialization

pub mod connection;
pub mod migrations;

pub use connection::{create_connection_pool, default_database_path, ConnectionPool};

pub use migrations::{initialize_database, verify_database_integrity};
