use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::params::{parse_bound, parse_choice, parse_flag, parse_limit, present};
use super::AppState;
use crate::domain::Token;
use crate::engine::query::DEFAULT_SEARCH_LIMIT;
use crate::engine::{Category, Page, Range, SearchQuery, TextField};
use crate::error::AppError;

const CATEGORY_CHOICES: &str = "trending, marketcap, new, finalized, pre-active, all";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub by: Option<String>,
    pub category: Option<String>,
    pub include_nsfw: Option<String>,
    pub mcap_min: Option<String>,
    pub mcap_max: Option<String>,
    pub vol_min: Option<String>,
    pub vol_max: Option<String>,
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub items: Vec<Token>,
    pub next_cursor: Option<String>,
}

impl From<Page> for SearchResponse {
    fn from(page: Page) -> Self {
        SearchResponse {
            items: page.items,
            next_cursor: page.next_cursor,
        }
    }
}

/// Build a typed search query from raw parameters.
///
/// Naming a single field with `by` makes `q` mandatory.
pub fn parse_search_params(params: &SearchParams) -> Result<SearchQuery, AppError> {
    let text = present(params.q.as_deref()).map(str::to_string);
    let text_field = match present(params.by.as_deref()) {
        None => TextField::Any,
        Some(_) => {
            let field: TextField = parse_choice(params.by.as_deref(), "by", "name, symbol")?;
            if text.is_none() {
                return Err(AppError::BadRequest("Missing query param q".to_string()));
            }
            field
        }
    };

    let category: Category =
        parse_choice(params.category.as_deref(), "category", CATEGORY_CHOICES)?;

    Ok(SearchQuery {
        text,
        text_field,
        category,
        include_nsfw: parse_flag(params.include_nsfw.as_deref()),
        market_cap_range: Range::new(
            parse_bound(params.mcap_min.as_deref()),
            parse_bound(params.mcap_max.as_deref()),
        ),
        volume_range: Range::new(
            parse_bound(params.vol_min.as_deref()),
            parse_bound(params.vol_max.as_deref()),
        ),
        limit: parse_limit(params.limit.as_deref(), DEFAULT_SEARCH_LIMIT),
        cursor: present(params.cursor.as_deref()).map(str::to_string),
    })
}

pub async fn search_tokens(
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = parse_search_params(&params)?;
    let page = state.engine.search(&query).await?;
    Ok(Json(page.into()))
}

/// Homepage trending tab: a search pinned to the trending category.
pub async fn homepage_trending(
    Query(params): Query<TrendingParams>,
    State(state): State<AppState>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = SearchQuery {
        category: Category::Trending,
        limit: parse_limit(params.limit.as_deref(), DEFAULT_SEARCH_LIMIT),
        cursor: present(params.cursor.as_deref()).map(str::to_string),
        ..SearchQuery::default()
    };
    let page = state.engine.search(&query).await?;
    Ok(Json(page.into()))
}
