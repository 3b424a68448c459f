//! In-memory catalog, used for tests and the `memory` backend.

use super::{CatalogAccessor, CatalogError};
use crate::domain::{Token, TokenId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Catalog held entirely in memory.
///
/// Readers clone an `Arc` of the current snapshot, so a concurrent [`replace_all`] never yields
/// a half-updated view. Ids are unique: a token whose id is already present replaces the
/// earlier record in place.
///
/// [`replace_all`]: InMemoryCatalog::replace_all
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    snapshot: RwLock<Arc<Vec<Token>>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding `tokens`.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(dedupe_by_id(tokens))),
        }
    }

    /// Add a token to the catalog.
    pub fn with_token(self, token: Token) -> Self {
        self.with_tokens(vec![token])
    }

    /// Add multiple tokens to the catalog.
    pub fn with_tokens(self, tokens: Vec<Token>) -> Self {
        let current = self
            .snapshot
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let mut all = Arc::unwrap_or_clone(current);
        all.extend(tokens);
        Self::from_tokens(all)
    }

    /// Swap the whole catalog for a new snapshot.
    pub fn replace_all(&self, tokens: Vec<Token>) -> Result<(), CatalogError> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        *guard = Arc::new(dedupe_by_id(tokens));
        Ok(())
    }

    fn current(&self) -> Result<Arc<Vec<Token>>, CatalogError> {
        self.snapshot
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|e| CatalogError::Unavailable(e.to_string()))
    }
}

/// Last write wins, at the position the id first appeared.
fn dedupe_by_id(tokens: Vec<Token>) -> Vec<Token> {
    let mut slots: HashMap<TokenId, usize> = HashMap::with_capacity(tokens.len());
    let mut unique: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match slots.get(&token.id).copied() {
            Some(slot) => unique[slot] = token,
            None => {
                slots.insert(token.id.clone(), unique.len());
                unique.push(token);
            }
        }
    }
    unique
}

#[async_trait]
impl CatalogAccessor for InMemoryCatalog {
    async fn fetch_all(&self) -> Result<Vec<Token>, CatalogError> {
        Ok(self.current()?.as_ref().clone())
    }
}
