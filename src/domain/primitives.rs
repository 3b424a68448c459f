//! Domain primitives: TokenId, Address, TokenStatus.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Opaque, catalog-unique token identifier.
///
/// Ordered lexicographically; the ordering is the final tie-break of every ranking.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub String);

impl TokenId {
    /// Create a TokenId from a string.
    pub fn new(id: String) -> Self {
        TokenId(id)
    }

    /// Get the id as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chain address (token contract or creator wallet), matched as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    /// Create an Address from a string.
    pub fn new(addr: String) -> Self {
        Address(addr)
    }

    /// Get the address as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for exact, case-insensitive lookups.
    pub fn normalized(&self) -> String {
        self.0.trim().to_ascii_lowercase()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a token's bonding curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenStatus {
    /// Trading on the bonding curve.
    Active,
    /// Created but not yet tradable.
    PreActive,
    /// Curve completed and liquidity migrated.
    Finalized,
}

impl TokenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStatus::Active => "ACTIVE",
            TokenStatus::PreActive => "PRE_ACTIVE",
            TokenStatus::Finalized => "FINALIZED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid token status: {0}")]
pub struct StatusParseError(pub String);

impl FromStr for TokenStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ACTIVE" => Ok(TokenStatus::Active),
            "PRE_ACTIVE" => Ok(TokenStatus::PreActive),
            "FINALIZED" => Ok(TokenStatus::Finalized),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
