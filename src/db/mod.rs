//! SQLite storage backing the token catalog.
//!
//! This module provides:
//! - Database initialization and schema setup
//! - SQLite pragma configuration
//! - Repository layer for token reads and upserts

pub mod migrations;
pub mod repo;

pub use migrations::init_db;
pub use repo::Repository;
