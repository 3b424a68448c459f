//! Catalog accessor abstraction: read-only access to the token dataset.

use crate::domain::Token;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod memory;
pub mod seed;
pub mod sqlite;

pub use memory::InMemoryCatalog;
pub use seed::{load_seed_file, parse_catalog_csv, SeedError};
pub use sqlite::SqliteCatalog;

/// Read interface over the token catalog.
///
/// Each call returns a consistent point-in-time snapshot. Implementations never need to
/// pre-filter or pre-sort; the discovery engine does both.
#[async_trait]
pub trait CatalogAccessor: Send + Sync + fmt::Debug {
    /// Fetch every token currently in the catalog.
    async fn fetch_all(&self) -> Result<Vec<Token>, CatalogError>;

    /// Look up a single token by address (case-insensitive).
    async fn find_by_address(&self, address: &str) -> Result<Option<Token>, CatalogError> {
        let needle = address.trim().to_ascii_lowercase();
        Ok(self
            .fetch_all()
            .await?
            .into_iter()
            .find(|t| t.address.normalized() == needle))
    }
}

/// Error type for catalog reads.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),
    /// Catalog is temporarily unreadable.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}
