//! Token record: the unit the discovery engine filters, sorts and ranks.

use crate::domain::{Address, Decimal, TokenId, TokenStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate counters attached to a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenCounts {
    pub liquidity_events: u64,
}

/// A token listed on the marketplace.
///
/// Market measures are optional; absent values behave as zero for filtering and sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: TokenId,
    pub address: Address,
    #[serde(default)]
    pub creator_address: Option<Address>,
    pub name: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub chain_id: Option<i64>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    pub status: TokenStatus,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    #[serde(default)]
    pub market_cap_change_24h: Option<Decimal>,
    #[serde(default)]
    pub volume_24h: Option<Decimal>,
    #[serde(default)]
    pub volume_change_24h: Option<Decimal>,
    /// `None` means unknown and ranks below every known count.
    #[serde(default)]
    pub holders: Option<u64>,
    #[serde(rename = "isNSFW", default)]
    pub is_nsfw: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub latest_transaction_timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "_count", default)]
    pub counts: TokenCounts,
}

impl Token {
    /// Create a token with the identifying fields set and everything else empty.
    pub fn new(
        id: TokenId,
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        status: TokenStatus,
    ) -> Self {
        Token {
            id,
            address,
            creator_address: None,
            name: name.into(),
            symbol: symbol.into(),
            subtitle: None,
            logo: None,
            description: None,
            chain_id: None,
            website: None,
            telegram: None,
            discord: None,
            twitter: None,
            youtube: None,
            status,
            market_cap: None,
            market_cap_change_24h: None,
            volume_24h: None,
            volume_change_24h: None,
            holders: None,
            is_nsfw: false,
            created_at: None,
            updated_at: None,
            latest_transaction_timestamp: None,
            counts: TokenCounts::default(),
        }
    }

    /// Market cap with absent treated as zero.
    pub fn market_cap_or_zero(&self) -> Decimal {
        self.market_cap.unwrap_or_else(Decimal::zero)
    }

    /// 24h volume with absent treated as zero.
    pub fn volume_or_zero(&self) -> Decimal {
        self.volume_24h.unwrap_or_else(Decimal::zero)
    }

    /// Case-insensitive text fields the free-text search looks at, in match priority order.
    pub fn searchable_fields(&self) -> [Option<&str>; 4] {
        [
            Some(self.name.as_str()),
            Some(self.symbol.as_str()),
            Some(self.address.as_str()),
            self.creator_address.as_ref().map(Address::as_str),
        ]
    }
}
