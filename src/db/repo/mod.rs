//! Repository layer for catalog storage.
//!
//! This module provides the `Repository` struct. Query methods live in submodules:
//! - `tokens.rs` - token upserts and catalog reads

mod tokens;

use crate::domain::{Address, Decimal, Token, TokenCounts, TokenId, TokenStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use tracing::warn;

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }
}

pub(crate) fn format_timestamp(ts: Option<DateTime<Utc>>) -> Option<String> {
    ts.map(|t| t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

fn parse_decimal_column(row: &SqliteRow, column: &str, id: &str) -> Option<Decimal> {
    let raw: Option<String> = row.get(column);
    raw.and_then(|s| match Decimal::from_str(&s) {
        Ok(d) => Some(d),
        Err(e) => {
            warn!(id = %id, column, value = %s, error = %e, "Unparseable decimal column, treating as absent");
            None
        }
    })
}

fn parse_timestamp_column(row: &SqliteRow, column: &str, id: &str) -> Option<DateTime<Utc>> {
    let raw: Option<String> = row.get(column);
    raw.and_then(|s| match DateTime::parse_from_rfc3339(&s) {
        Ok(t) => Some(t.with_timezone(&Utc)),
        Err(e) => {
            warn!(id = %id, column, value = %s, error = %e, "Unparseable timestamp column, treating as absent");
            None
        }
    })
}

/// Map a `tokens` row to a Token; `None` when the row has no recognizable status.
pub(crate) fn token_from_row(row: &SqliteRow) -> Option<Token> {
    let id: String = row.get("id");
    let status_str: String = row.get("status");
    let status = match TokenStatus::from_str(&status_str) {
        Ok(s) => s,
        Err(e) => {
            warn!(id = %id, error = %e, "Skipping token row with invalid status");
            return None;
        }
    };

    let holders = row.get::<Option<i64>, _>("holders").and_then(|h| {
        u64::try_from(h)
            .map_err(|_| warn!(id = %id, holders = h, "Negative holder count, treating as unknown"))
            .ok()
    });
    let liquidity_events = u64::try_from(row.get::<i64, _>("liquidity_events")).unwrap_or(0);

    Some(Token {
        address: Address::new(row.get("address")),
        creator_address: row.get::<Option<String>, _>("creator_address").map(Address::new),
        name: row.get("name"),
        symbol: row.get("symbol"),
        subtitle: row.get("subtitle"),
        logo: row.get("logo"),
        description: row.get("description"),
        chain_id: row.get("chain_id"),
        website: row.get("website"),
        telegram: row.get("telegram"),
        discord: row.get("discord"),
        twitter: row.get("twitter"),
        youtube: row.get("youtube"),
        status,
        market_cap: parse_decimal_column(row, "market_cap", &id),
        market_cap_change_24h: parse_decimal_column(row, "market_cap_change_24h", &id),
        volume_24h: parse_decimal_column(row, "volume_24h", &id),
        volume_change_24h: parse_decimal_column(row, "volume_change_24h", &id),
        holders,
        is_nsfw: row.get::<i64, _>("is_nsfw") != 0,
        created_at: parse_timestamp_column(row, "created_at", &id),
        updated_at: parse_timestamp_column(row, "updated_at", &id),
        latest_transaction_timestamp: parse_timestamp_column(
            row,
            "latest_transaction_timestamp",
            &id,
        ),
        counts: TokenCounts { liquidity_events },
        id: TokenId::new(id),
    })
}
