use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::params::{parse_choice, parse_flag, parse_limit};
use super::AppState;
use crate::domain::{Decimal, Token};
use crate::engine::query::{DEFAULT_LIST_LIMIT, DEFAULT_TOP_LIMIT};
use crate::engine::{LeaderboardQuery, LeaderboardSort, RankedToken, SortOrder};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardTopParams {
    pub limit: Option<String>,
    pub include_nsfw: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardListParams {
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub include_nsfw: Option<String>,
}

/// Top card entry: the full token record plus its rank.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopEntry {
    pub rank: u32,
    pub token_address: String,
    #[serde(flatten)]
    pub token: Token,
}

/// Table row for the full leaderboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub rank: u32,
    pub token_address: String,
    pub name: String,
    pub symbol: String,
    pub creator_address: Option<String>,
    pub holders: Option<u64>,
    pub market_cap: Decimal,
    pub market_cap_change_24h: Option<Decimal>,
    pub volume_24h: Decimal,
    pub volume_change_24h: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub items: Vec<ListEntry>,
}

impl From<RankedToken> for TopEntry {
    fn from(ranked: RankedToken) -> Self {
        TopEntry {
            rank: ranked.rank,
            token_address: ranked.token.address.as_str().to_string(),
            token: ranked.token,
        }
    }
}

impl From<RankedToken> for ListEntry {
    fn from(ranked: RankedToken) -> Self {
        let t = ranked.token;
        ListEntry {
            rank: ranked.rank,
            market_cap: t.market_cap_or_zero(),
            volume_24h: t.volume_or_zero(),
            token_address: t.address.0,
            name: t.name,
            symbol: t.symbol,
            creator_address: t.creator_address.map(|a| a.0),
            holders: t.holders,
            market_cap_change_24h: t.market_cap_change_24h,
            volume_change_24h: t.volume_change_24h,
        }
    }
}

pub fn parse_top_params(params: &LeaderboardTopParams) -> LeaderboardQuery {
    LeaderboardQuery {
        include_nsfw: parse_flag(params.include_nsfw.as_deref()),
        ..LeaderboardQuery::top(parse_limit(params.limit.as_deref(), DEFAULT_TOP_LIMIT))
    }
}

pub fn parse_list_params(params: &LeaderboardListParams) -> Result<LeaderboardQuery, AppError> {
    let sort: LeaderboardSort =
        parse_choice(params.sort.as_deref(), "sort", "marketCap, volume24h")?;
    let order: SortOrder = parse_choice(params.order.as_deref(), "order", "asc, desc")?;

    Ok(LeaderboardQuery {
        include_nsfw: parse_flag(params.include_nsfw.as_deref()),
        ..LeaderboardQuery::list(
            sort,
            order,
            parse_limit(params.limit.as_deref(), DEFAULT_LIST_LIMIT),
        )
    })
}

pub async fn get_leaderboard_top(
    Query(params): Query<LeaderboardTopParams>,
    State(state): State<AppState>,
) -> Result<Json<Vec<TopEntry>>, AppError> {
    let query = parse_top_params(&params);
    let ranked = state.engine.leaderboard(&query).await?;
    Ok(Json(ranked.into_iter().map(TopEntry::from).collect()))
}

pub async fn get_leaderboard_list(
    Query(params): Query<LeaderboardListParams>,
    State(state): State<AppState>,
) -> Result<Json<ListResponse>, AppError> {
    let query = parse_list_params(&params)?;
    let ranked = state.engine.leaderboard(&query).await?;
    Ok(Json(ListResponse {
        items: ranked.into_iter().map(ListEntry::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LeaderboardMode;

    #[test]
    fn top_defaults_to_three() {
        let query = parse_top_params(&LeaderboardTopParams::default());
        assert_eq!(query, LeaderboardQuery::top(3));
    }

    #[test]
    fn list_defaults_to_market_cap_desc_fifty() {
        let query = parse_list_params(&LeaderboardListParams::default()).unwrap();
        assert_eq!(
            query.mode,
            LeaderboardMode::List {
                sort: LeaderboardSort::MarketCap,
                order: SortOrder::Desc
            }
        );
        assert_eq!(query.limit, 50);
        assert!(!query.include_nsfw);
    }

    #[test]
    fn list_rejects_unknown_sort() {
        let params = LeaderboardListParams {
            sort: Some("holders".to_string()),
            ..LeaderboardListParams::default()
        };
        assert!(matches!(parse_list_params(&params), Err(AppError::BadRequest(_))));
    }
}
