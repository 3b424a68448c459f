use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::params::present;
use super::AppState;
use crate::domain::Token;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct TokenInfoParams {
    pub address: Option<String>,
}

pub async fn get_token_info(
    Query(params): Query<TokenInfoParams>,
    State(state): State<AppState>,
) -> Result<Json<Token>, AppError> {
    let address = present(params.address.as_deref())
        .ok_or_else(|| AppError::BadRequest("address is required".to_string()))?;

    state
        .engine
        .token_by_address(address)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("token {}", address)))
}
