//! CSV seed loader for populating a catalog at startup.
//!
//! Expected header (column order is free, unknown columns are ignored):
//! `id,address,creator_address,name,symbol,subtitle,logo,description,chain_id,status,
//! market_cap,market_cap_change_24h,volume_24h,volume_change_24h,holders,is_nsfw,
//! created_at,updated_at,latest_transaction_timestamp,liquidity_events`

use crate::domain::{Address, Decimal, Token, TokenId, TokenStatus};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed file unreadable: {0}")]
    Io(String),
    #[error("csv error: {0}")]
    Csv(String),
    #[error("line {line}: {message}")]
    Row { line: u64, message: String },
}

#[derive(Debug, serde::Deserialize)]
struct Row {
    id: Option<String>,
    address: String,
    creator_address: Option<String>,
    name: String,
    symbol: String,
    subtitle: Option<String>,
    logo: Option<String>,
    description: Option<String>,
    chain_id: Option<String>,
    status: String,
    market_cap: Option<String>,
    market_cap_change_24h: Option<String>,
    volume_24h: Option<String>,
    volume_change_24h: Option<String>,
    holders: Option<String>,
    is_nsfw: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    latest_transaction_timestamp: Option<String>,
    liquidity_events: Option<String>,
}

/// Read and parse a seed file.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<Token>, SeedError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| SeedError::Io(format!("{}: {}", path.display(), e)))?;
    parse_catalog_csv(&bytes)
}

/// Parse CSV bytes into tokens.
///
/// Rows without an id get a fresh random id. Blank optional cells are absent values.
/// Ids must be unique across the file.
pub fn parse_catalog_csv(csv_bytes: &[u8]) -> Result<Vec<Token>, SeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_bytes);

    let mut tokens = Vec::new();
    let mut seen = HashSet::new();
    let headers = reader
        .headers()
        .map_err(|e| SeedError::Csv(e.to_string()))?
        .clone();
    for record in reader.records() {
        let record = record.map_err(|e| SeedError::Csv(e.to_string()))?;
        let line = record.position().map_or(0, |p| p.line());
        let row: Row = record
            .deserialize(Some(&headers))
            .map_err(|e| SeedError::Row { line, message: e.to_string() })?;
        let token = token_from_row(row).map_err(|message| SeedError::Row { line, message })?;
        if !seen.insert(token.id.clone()) {
            return Err(SeedError::Row {
                line,
                message: format!("duplicate id {}", token.id.as_str()),
            });
        }
        tokens.push(token);
    }

    Ok(tokens)
}

fn non_blank(cell: Option<String>) -> Option<String> {
    cell.filter(|s| !s.trim().is_empty())
}

fn decimal_cell(cell: Option<String>, column: &str) -> Result<Option<Decimal>, String> {
    non_blank(cell)
        .map(|s| Decimal::parse_lenient(&s).ok_or_else(|| format!("invalid {}: {}", column, s)))
        .transpose()
}

fn timestamp_cell(cell: Option<String>, column: &str) -> Result<Option<DateTime<Utc>>, String> {
    non_blank(cell)
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| format!("invalid {}: {}", column, e))
        })
        .transpose()
}

fn integer_cell<T: FromStr>(cell: Option<String>, column: &str) -> Result<Option<T>, String> {
    non_blank(cell)
        .map(|s| s.parse::<T>().map_err(|_| format!("invalid {}: {}", column, s)))
        .transpose()
}

fn parse_flag(cell: Option<String>) -> Result<bool, String> {
    match non_blank(cell).map(|s| s.to_ascii_lowercase()).as_deref() {
        None | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some(other) => Err(format!("invalid is_nsfw: {}", other)),
    }
}

fn token_from_row(row: Row) -> Result<Token, String> {
    let status = TokenStatus::from_str(&row.status).map_err(|e| e.to_string())?;
    if row.address.is_empty() {
        return Err("address is required".to_string());
    }
    let id = non_blank(row.id).unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let mut token = Token::new(TokenId::new(id), Address::new(row.address), row.name, row.symbol, status);
    token.creator_address = non_blank(row.creator_address).map(Address::new);
    token.subtitle = non_blank(row.subtitle);
    token.logo = non_blank(row.logo);
    token.description = non_blank(row.description);
    token.chain_id = integer_cell(row.chain_id, "chain_id")?;
    token.market_cap = decimal_cell(row.market_cap, "market_cap")?;
    token.market_cap_change_24h = decimal_cell(row.market_cap_change_24h, "market_cap_change_24h")?;
    token.volume_24h = decimal_cell(row.volume_24h, "volume_24h")?;
    token.volume_change_24h = decimal_cell(row.volume_change_24h, "volume_change_24h")?;
    token.holders = integer_cell(row.holders, "holders")?;
    token.is_nsfw = parse_flag(row.is_nsfw)?;
    token.created_at = timestamp_cell(row.created_at, "created_at")?;
    token.updated_at = timestamp_cell(row.updated_at, "updated_at")?;
    token.latest_transaction_timestamp =
        timestamp_cell(row.latest_transaction_timestamp, "latest_transaction_timestamp")?;
    token.counts.liquidity_events =
        integer_cell(row.liquidity_events, "liquidity_events")?.unwrap_or(0);

    Ok(token)
}
