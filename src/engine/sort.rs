//! Category sort strategy: maps a discovery view to a total order over tokens.
//!
//! Every ordering is `(primary key, direction)` followed by `id` ascending, so no two distinct
//! tokens ever compare equal and page boundaries are reproducible.

use crate::domain::{Decimal, Token, TokenId};
use crate::engine::query::{Category, LeaderboardMode, LeaderboardSort, SortOrder};
use std::cmp::Ordering;

/// Token attribute an ordering ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Volume24h,
    MarketCap,
    CreatedAt,
}

impl SortField {
    fn as_str(&self) -> &'static str {
        match self {
            SortField::Volume24h => "volume24h",
            SortField::MarketCap => "marketCap",
            SortField::CreatedAt => "createdAt",
        }
    }

    /// Extract this field's sort value from a token.
    pub fn value_of(&self, token: &Token) -> SortValue {
        match self {
            SortField::Volume24h => SortValue::Amount(token.volume_or_zero()),
            SortField::MarketCap => SortValue::Amount(token.market_cap_or_zero()),
            SortField::CreatedAt => {
                SortValue::Instant(token.created_at.map(|t| t.timestamp_micros()))
            }
        }
    }

    /// Parse a value previously rendered by [`SortValue::render`] for this field.
    pub fn parse_value(&self, raw: &str) -> Option<SortValue> {
        match self {
            SortField::Volume24h | SortField::MarketCap => {
                Decimal::from_str_canonical(raw).ok().map(SortValue::Amount)
            }
            SortField::CreatedAt if raw.is_empty() => Some(SortValue::Instant(None)),
            SortField::CreatedAt => raw.parse::<i64>().ok().map(|us| SortValue::Instant(Some(us))),
        }
    }
}

/// A token's primary sort key.
///
/// Missing timestamps order below every present one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Amount(Decimal),
    /// Microseconds since the Unix epoch.
    Instant(Option<i64>),
}

impl SortValue {
    /// Lossless string form used inside pagination cursors.
    pub fn render(&self) -> String {
        match self {
            SortValue::Amount(d) => d.to_canonical_string(),
            SortValue::Instant(Some(us)) => us.to_string(),
            SortValue::Instant(None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A concrete total order over tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenOrdering {
    pub field: SortField,
    pub direction: Direction,
}

impl TokenOrdering {
    pub fn new(field: SortField, direction: Direction) -> Self {
        TokenOrdering { field, direction }
    }

    /// Ordering backing a discovery category.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::MarketCap => Self::new(SortField::MarketCap, Direction::Descending),
            Category::New => Self::new(SortField::CreatedAt, Direction::Descending),
            Category::Trending | Category::Finalized | Category::PreActive | Category::All => {
                Self::new(SortField::Volume24h, Direction::Descending)
            }
        }
    }

    /// Ordering backing a leaderboard view.
    ///
    /// Ascending lists invert the primary comparison only; the `id` tie-break stays ascending.
    pub fn for_leaderboard(mode: LeaderboardMode) -> Self {
        match mode {
            LeaderboardMode::Top => Self::new(SortField::MarketCap, Direction::Descending),
            LeaderboardMode::List { sort, order } => {
                let field = match sort {
                    LeaderboardSort::MarketCap => SortField::MarketCap,
                    LeaderboardSort::Volume24h => SortField::Volume24h,
                };
                let direction = match order {
                    SortOrder::Asc => Direction::Ascending,
                    SortOrder::Desc => Direction::Descending,
                };
                Self::new(field, direction)
            }
        }
    }

    /// Stable identifier of this ordering, e.g. `volume24h:desc`.
    pub fn tag(&self) -> String {
        let dir = match self.direction {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };
        format!("{}:{}", self.field.as_str(), dir)
    }

    /// Compare two `(key, id)` positions under this ordering.
    pub fn compare_keys(&self, a: (&SortValue, &TokenId), b: (&SortValue, &TokenId)) -> Ordering {
        let primary = match self.direction {
            Direction::Ascending => a.0.cmp(b.0),
            Direction::Descending => b.0.cmp(a.0),
        };
        primary.then_with(|| a.1.cmp(b.1))
    }

    pub fn compare(&self, a: &Token, b: &Token) -> Ordering {
        self.compare_keys(
            (&self.field.value_of(a), &a.id),
            (&self.field.value_of(b), &b.id),
        )
    }

    /// Sort tokens into this ordering.
    ///
    /// Keys are extracted once per token; the result does not depend on input order.
    pub fn sort(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut keyed: Vec<(SortValue, Token)> = tokens
            .into_iter()
            .map(|t| (self.field.value_of(&t), t))
            .collect();
        keyed.sort_by(|a, b| self.compare_keys((&a.0, &a.1.id), (&b.0, &b.1.id)));
        keyed.into_iter().map(|(_, t)| t).collect()
    }
}
