//! Pure, deterministic discovery logic: filtering, ordering, pagination and ranking.
//!
//! Nothing here performs I/O or holds state; every function is a function of its inputs.

pub mod cursor;
pub mod filter;
pub mod query;
pub mod ranking;
pub mod sort;

pub use cursor::{CursorCodec, CursorError, ResumePoint};
pub use filter::filter;
pub use query::{
    clamp_limit, Category, FilterCriteria, LeaderboardMode, LeaderboardQuery, LeaderboardSort,
    Range, SearchQuery, SortOrder, TextField,
};
pub use ranking::{assemble, RankedToken};
pub use sort::{Direction, SortField, SortValue, TokenOrdering};

use crate::domain::Token;
use std::cmp::Ordering;

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Token>,
    pub next_cursor: Option<String>,
}

/// Cut one page out of `sorted`, which must already be in `ordering`.
///
/// The page starts strictly after `resume` (or at the beginning). A next cursor is minted only
/// when the page is full and at least one more item follows it.
pub fn paginate(
    mut sorted: Vec<Token>,
    ordering: &TokenOrdering,
    resume: Option<&ResumePoint>,
    limit: usize,
    codec: &CursorCodec,
) -> Page {
    let start = match resume {
        Some(point) => sorted.partition_point(|t| {
            let key = ordering.field.value_of(t);
            ordering.compare_keys((&key, &t.id), (&point.key, &point.id)) != Ordering::Greater
        }),
        None => 0,
    };

    let remaining = sorted.len() - start;
    let end = start + remaining.min(limit);
    let has_more = remaining > limit;
    let items: Vec<Token> = sorted.drain(start..end).collect();

    let next_cursor = match items.last() {
        Some(last) if has_more && items.len() == limit => Some(codec.encode(
            ordering,
            &ordering.field.value_of(last),
            &last.id,
        )),
        _ => None,
    };

    Page { items, next_cursor }
}
