pub mod health;
pub mod leaderboard;
pub mod params;
pub mod search;
pub mod token;

use crate::catalog::{load_seed_file, CatalogAccessor, InMemoryCatalog, SqliteCatalog};
use crate::config::{CatalogBackend, Config};
use crate::db::{init_db, Repository};
use crate::engine::CursorCodec;
use crate::error::AppError;
use crate::orchestration::DiscoveryEngine;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DiscoveryEngine>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogAccessor>, cursor_secret: &str) -> Self {
        Self {
            engine: Arc::new(DiscoveryEngine::new(catalog, CursorCodec::new(cursor_secret))),
        }
    }

    /// Open the configured catalog backend, apply the seed file if any, and build the state.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let seed = match &config.catalog_seed_file {
            Some(path) => {
                let tokens = load_seed_file(path).map_err(|e| AppError::Config(e.to_string()))?;
                info!(path = %path, tokens = tokens.len(), "Loaded catalog seed file");
                tokens
            }
            None => Vec::new(),
        };

        let catalog: Arc<dyn CatalogAccessor> = match config.catalog_backend {
            CatalogBackend::Memory => Arc::new(InMemoryCatalog::from_tokens(seed)),
            CatalogBackend::Sqlite => {
                let path = config
                    .database_path
                    .as_deref()
                    .ok_or_else(|| AppError::Config("DATABASE_PATH is required".to_string()))?;
                let repo = Arc::new(Repository::new(init_db(path).await?));
                let written = repo.upsert_tokens_batch(&seed).await?;
                info!(written, stored = repo.count_tokens().await?, "SQLite catalog ready");
                Arc::new(SqliteCatalog::new(repo))
            }
        };

        Ok(Self::new(catalog, &config.cursor_secret))
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/token/search", get(search::search_tokens))
        .route("/token/info", get(token::get_token_info))
        .route("/homepage/trending", get(search::homepage_trending))
        .route("/leaderboard/top", get(leaderboard::get_leaderboard_top))
        .route("/leaderboard/list", get(leaderboard::get_leaderboard_list))
        .layer(cors)
        .with_state(state)
}
