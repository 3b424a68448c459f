pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use catalog::{CatalogAccessor, CatalogError, InMemoryCatalog, SqliteCatalog};
pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{Address, Decimal, Token, TokenId, TokenStatus};
pub use engine::{Category, LeaderboardQuery, Page, SearchQuery};
pub use error::AppError;
pub use orchestration::{DiscoveryEngine, DiscoveryError};
