//! Token operations for the repository.

use crate::domain::Token;
use sqlx::sqlite::SqliteArguments;
use sqlx::query::Query;
use sqlx::Sqlite;

use super::{format_timestamp, token_from_row, Repository};

const UPSERT_TOKEN_SQL: &str = r#"
    INSERT INTO tokens (
        id, address, address_key, creator_address, name, symbol, subtitle, logo,
        description, chain_id, website, telegram, discord, twitter, youtube, status,
        market_cap, market_cap_change_24h, volume_24h, volume_change_24h, holders, is_nsfw,
        created_at, updated_at, latest_transaction_timestamp, liquidity_events, ingested_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT(id) DO UPDATE SET
        address = excluded.address,
        address_key = excluded.address_key,
        creator_address = excluded.creator_address,
        name = excluded.name,
        symbol = excluded.symbol,
        subtitle = excluded.subtitle,
        logo = excluded.logo,
        description = excluded.description,
        chain_id = excluded.chain_id,
        website = excluded.website,
        telegram = excluded.telegram,
        discord = excluded.discord,
        twitter = excluded.twitter,
        youtube = excluded.youtube,
        status = excluded.status,
        market_cap = excluded.market_cap,
        market_cap_change_24h = excluded.market_cap_change_24h,
        volume_24h = excluded.volume_24h,
        volume_change_24h = excluded.volume_change_24h,
        holders = excluded.holders,
        is_nsfw = excluded.is_nsfw,
        created_at = excluded.created_at,
        updated_at = excluded.updated_at,
        latest_transaction_timestamp = excluded.latest_transaction_timestamp,
        liquidity_events = excluded.liquidity_events,
        ingested_at = excluded.ingested_at
"#;

const SELECT_TOKEN_COLUMNS: &str = r#"
    SELECT id, address, creator_address, name, symbol, subtitle, logo, description, chain_id,
           website, telegram, discord, twitter, youtube, status, market_cap,
           market_cap_change_24h, volume_24h, volume_change_24h, holders, is_nsfw,
           created_at, updated_at, latest_transaction_timestamp, liquidity_events
    FROM tokens
"#;

fn bind_token<'q>(token: &'q Token, ingested_at: i64) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    sqlx::query(UPSERT_TOKEN_SQL)
        .bind(token.id.as_str())
        .bind(token.address.as_str())
        .bind(token.address.normalized())
        .bind(token.creator_address.as_ref().map(|a| a.as_str()))
        .bind(token.name.as_str())
        .bind(token.symbol.as_str())
        .bind(token.subtitle.as_deref())
        .bind(token.logo.as_deref())
        .bind(token.description.as_deref())
        .bind(token.chain_id)
        .bind(token.website.as_deref())
        .bind(token.telegram.as_deref())
        .bind(token.discord.as_deref())
        .bind(token.twitter.as_deref())
        .bind(token.youtube.as_deref())
        .bind(token.status.as_str())
        .bind(token.market_cap.map(|d| d.to_canonical_string()))
        .bind(token.market_cap_change_24h.map(|d| d.to_canonical_string()))
        .bind(token.volume_24h.map(|d| d.to_canonical_string()))
        .bind(token.volume_change_24h.map(|d| d.to_canonical_string()))
        .bind(token.holders.and_then(|h| i64::try_from(h).ok()))
        .bind(token.is_nsfw)
        .bind(format_timestamp(token.created_at))
        .bind(format_timestamp(token.updated_at))
        .bind(format_timestamp(token.latest_transaction_timestamp))
        .bind(i64::try_from(token.counts.liquidity_events).unwrap_or(i64::MAX))
        .bind(ingested_at)
}

impl Repository {
    /// Insert or replace a token keyed by its id.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub async fn upsert_token(&self, token: &Token) -> Result<(), sqlx::Error> {
        bind_token(token, chrono::Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Upsert many tokens in a single transaction.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    /// Returns an error if the transaction fails; no rows are written in that case.
    pub async fn upsert_tokens_batch(&self, tokens: &[Token]) -> Result<usize, sqlx::Error> {
        if tokens.is_empty() {
            return Ok(0);
        }

        let ingested_at = chrono::Utc::now().timestamp_millis();
        let mut tx = self.pool.begin().await?;
        for token in tokens {
            bind_token(token, ingested_at).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        Ok(tokens.len())
    }

    /// Read every token, ordered by id.
    ///
    /// Rows that cannot be mapped to a token are logged and skipped.
    pub async fn query_all_tokens(&self) -> Result<Vec<Token>, sqlx::Error> {
        let sql = format!("{} ORDER BY id", SELECT_TOKEN_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().filter_map(token_from_row).collect())
    }

    /// Look up a token by address, ignoring ASCII case.
    pub async fn query_token_by_address(&self, address: &str) -> Result<Option<Token>, sqlx::Error> {
        let sql = format!("{} WHERE address_key = ? ORDER BY id LIMIT 1", SELECT_TOKEN_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(address.trim().to_ascii_lowercase())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().and_then(token_from_row))
    }

    /// Number of stored tokens.
    pub async fn count_tokens(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tokens")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
