//! Typed query model consumed by the engine.
//!
//! Raw request parameters are converted into these types at the HTTP boundary; nothing in the
//! engine inspects untyped input.

use crate::domain::{Decimal, TokenStatus};
use std::str::FromStr;

pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const DEFAULT_TOP_LIMIT: usize = 3;
pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 50;

/// Clamp a requested page size into `[1, MAX_LIMIT]`, falling back to `default` when absent.
pub fn clamp_limit(requested: Option<i64>, default: usize) -> usize {
    match requested {
        Some(n) if n < 1 => 1,
        Some(n) => usize::try_from(n).unwrap_or(MAX_LIMIT).min(MAX_LIMIT),
        None => default.clamp(1, MAX_LIMIT),
    }
}

/// Named discovery view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Trending,
    MarketCap,
    New,
    Finalized,
    PreActive,
    All,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Trending,
        Category::MarketCap,
        Category::New,
        Category::Finalized,
        Category::PreActive,
        Category::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Trending => "trending",
            Category::MarketCap => "marketcap",
            Category::New => "new",
            Category::Finalized => "finalized",
            Category::PreActive => "pre-active",
            Category::All => "all",
        }
    }

    /// Status restriction implied by the category, if any.
    pub fn status_filter(&self) -> Option<TokenStatus> {
        match self {
            Category::Finalized => Some(TokenStatus::Finalized),
            Category::PreActive => Some(TokenStatus::PreActive),
            _ => None,
        }
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trending" => Ok(Category::Trending),
            "marketcap" => Ok(Category::MarketCap),
            "new" => Ok(Category::New),
            "finalized" => Ok(Category::Finalized),
            "pre-active" => Ok(Category::PreActive),
            "all" => Ok(Category::All),
            _ => Err(()),
        }
    }
}

/// Inclusive numeric range; either bound may be omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Range {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl Range {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Range { min, max }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Which token fields the free-text search considers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextField {
    /// Name, symbol, address and creator address.
    #[default]
    Any,
    Name,
    Symbol,
}

impl FromStr for TextField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(TextField::Name),
            "symbol" => Ok(TextField::Symbol),
            _ => Err(()),
        }
    }
}

/// Predicates applied by the filter pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub text: Option<String>,
    pub text_field: TextField,
    pub include_nsfw: bool,
    pub market_cap_range: Range,
    pub volume_range: Range,
    pub status: Option<TokenStatus>,
}

/// Search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub text_field: TextField,
    pub category: Category,
    pub include_nsfw: bool,
    pub market_cap_range: Range,
    pub volume_range: Range,
    pub limit: usize,
    pub cursor: Option<String>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery {
            text: None,
            text_field: TextField::Any,
            category: Category::default(),
            include_nsfw: false,
            market_cap_range: Range::default(),
            volume_range: Range::default(),
            limit: DEFAULT_SEARCH_LIMIT,
            cursor: None,
        }
    }
}

impl SearchQuery {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            text: self.text.clone(),
            text_field: self.text_field,
            include_nsfw: self.include_nsfw,
            market_cap_range: self.market_cap_range,
            volume_range: self.volume_range,
            status: self.category.status_filter(),
        }
    }
}

/// Leaderboard ranking metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeaderboardSort {
    #[default]
    MarketCap,
    Volume24h,
}

impl FromStr for LeaderboardSort {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marketcap" => Ok(LeaderboardSort::MarketCap),
            "volume24h" => Ok(LeaderboardSort::Volume24h),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

/// Leaderboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardMode {
    /// Highest market caps first.
    Top,
    /// Caller-selected metric and direction.
    List {
        sort: LeaderboardSort,
        order: SortOrder,
    },
}

/// Leaderboard request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub mode: LeaderboardMode,
    pub limit: usize,
    pub include_nsfw: bool,
}

impl LeaderboardQuery {
    pub fn top(limit: usize) -> Self {
        LeaderboardQuery {
            mode: LeaderboardMode::Top,
            limit,
            include_nsfw: false,
        }
    }

    pub fn list(sort: LeaderboardSort, order: SortOrder, limit: usize) -> Self {
        LeaderboardQuery {
            mode: LeaderboardMode::List { sort, order },
            limit,
            include_nsfw: false,
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            include_nsfw: self.include_nsfw,
            ..FilterCriteria::default()
        }
    }
}
