//! SQLite-backed catalog accessor.

use super::{CatalogAccessor, CatalogError};
use crate::db::Repository;
use crate::domain::Token;
use async_trait::async_trait;
use std::sync::Arc;

/// Catalog read from the `tokens` table.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    repo: Arc<Repository>,
}

impl SqliteCatalog {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CatalogAccessor for SqliteCatalog {
    async fn fetch_all(&self) -> Result<Vec<Token>, CatalogError> {
        Ok(self.repo.query_all_tokens().await?)
    }

    async fn find_by_address(&self, address: &str) -> Result<Option<Token>, CatalogError> {
        Ok(self.repo.query_token_by_address(address).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::domain::{Address, TokenId, TokenStatus};

    #[tokio::test]
    async fn test_sqlite_catalog_reads_repository() {
        let repo = Arc::new(Repository::new(init_db(":memory:").await.unwrap()));
        let token = Token::new(
            TokenId::new("1".to_string()),
            Address::new("0xABC".to_string()),
            "Demo Token",
            "DEMO",
            TokenStatus::Active,
        );
        repo.upsert_token(&token).await.unwrap();

        let catalog = SqliteCatalog::new(repo);
        assert_eq!(catalog.fetch_all().await.unwrap(), vec![token.clone()]);
        assert_eq!(catalog.find_by_address("0xabc").await.unwrap(), Some(token));
    }
}
