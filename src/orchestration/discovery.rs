use crate::catalog::{CatalogAccessor, CatalogError};
use crate::domain::Token;
use crate::engine::{
    assemble, filter, paginate, CursorCodec, CursorError, LeaderboardQuery, Page, RankedToken,
    SearchQuery, TokenOrdering,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Composes catalog reads with the pure discovery pipeline.
///
/// Holds no mutable state; every call reads one catalog snapshot and is independent of every
/// other call.
#[derive(Debug, Clone)]
pub struct DiscoveryEngine {
    catalog: Arc<dyn CatalogAccessor>,
    codec: CursorCodec,
}

impl DiscoveryEngine {
    pub fn new(catalog: Arc<dyn CatalogAccessor>, codec: CursorCodec) -> Self {
        Self { catalog, codec }
    }

    /// Run a search and return one page.
    ///
    /// A cursor that fails to decode is rejected before the catalog is read.
    pub async fn search(&self, query: &SearchQuery) -> Result<Page, DiscoveryError> {
        let ordering = TokenOrdering::for_category(query.category);
        let resume = query
            .cursor
            .as_deref()
            .map(|c| self.codec.decode(c, &ordering))
            .transpose()?;

        let snapshot = self.catalog.fetch_all().await?;
        let catalog_size = snapshot.len();
        let candidates = filter(snapshot, &query.criteria());
        let matched = candidates.len();
        let page = paginate(
            ordering.sort(candidates),
            &ordering,
            resume.as_ref(),
            query.limit,
            &self.codec,
        );

        debug!(
            category = query.category.as_str(),
            catalog_size,
            matched,
            returned = page.items.len(),
            has_more = page.next_cursor.is_some(),
            "Search completed"
        );
        Ok(page)
    }

    /// Rank the filtered catalog for a leaderboard view.
    pub async fn leaderboard(&self, query: &LeaderboardQuery) -> Result<Vec<RankedToken>, DiscoveryError> {
        let ordering = TokenOrdering::for_leaderboard(query.mode);
        let snapshot = self.catalog.fetch_all().await?;
        let ranked = assemble(ordering.sort(filter(snapshot, &query.criteria())), query.limit);

        debug!(ordering = %ordering.tag(), returned = ranked.len(), "Leaderboard assembled");
        Ok(ranked)
    }

    /// Look up a single token by address.
    pub async fn token_by_address(&self, address: &str) -> Result<Option<Token>, DiscoveryError> {
        Ok(self.catalog.find_by_address(address).await?)
    }

    /// Number of tokens currently visible in the catalog.
    pub async fn catalog_size(&self) -> Result<usize, DiscoveryError> {
        Ok(self.catalog.fetch_all().await?.len())
    }
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid cursor: {0}")]
    InvalidCursor(#[from] CursorError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
