//! Filter pipeline: narrows a catalog snapshot to the tokens matching a query.
//!
//! Stages run in a fixed order (text, visibility, numeric ranges, status) and never reorder the
//! candidate set.

use crate::domain::Token;
use crate::engine::query::{FilterCriteria, TextField};

/// Apply every filter stage to `catalog`, preserving input order.
pub fn filter(catalog: Vec<Token>, criteria: &FilterCriteria) -> Vec<Token> {
    let needle = criteria
        .text
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    catalog
        .into_iter()
        .filter(|t| {
            needle
                .as_deref()
                .map_or(true, |n| matches_text(t, n, criteria.text_field))
        })
        .filter(|t| criteria.include_nsfw || !t.is_nsfw)
        .filter(|t| within_ranges(t, criteria))
        .filter(|t| criteria.status.map_or(true, |status| t.status == status))
        .collect()
}

/// `needle` must already be lowercased.
fn matches_text(token: &Token, needle: &str, field: TextField) -> bool {
    let contains = |hay: Option<&str>| {
        hay.filter(|h| !h.is_empty())
            .is_some_and(|h| h.to_lowercase().contains(needle))
    };

    match field {
        TextField::Any => token.searchable_fields().into_iter().any(contains),
        TextField::Name => contains(Some(token.name.as_str())),
        TextField::Symbol => contains(Some(token.symbol.as_str())),
    }
}

fn within_ranges(token: &Token, criteria: &FilterCriteria) -> bool {
    criteria.market_cap_range.contains(token.market_cap_or_zero())
        && criteria.volume_range.contains(token.volume_or_zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Decimal, TokenId, TokenStatus};
    use crate::engine::query::Range;

    fn token(id: &str, name: &str, symbol: &str, mcap: i64, vol: i64) -> Token {
        let mut t = Token::new(
            TokenId::new(id.to_string()),
            Address::new(format!("0x{}", id)),
            name,
            symbol,
            TokenStatus::Active,
        );
        t.market_cap = Some(Decimal::from(mcap));
        t.volume_24h = Some(Decimal::from(vol));
        t
    }

    fn catalog() -> Vec<Token> {
        let mut nsfw = token("c", "Spicy", "HOT", 300, 30);
        nsfw.is_nsfw = true;
        let mut finalized = token("d", "Bonk", "BONK", 400, 40);
        finalized.status = TokenStatus::Finalized;
        finalized.creator_address = Some(Address::new("0xCreatorKuma".to_string()));
        vec![
            token("a", "Kuma Inu", "KUMA", 100, 10),
            token("b", "Baby Kuma", "BKUMA", 200, 20),
            nsfw,
            finalized,
        ]
    }

    fn ids(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn empty_criteria_drops_only_nsfw() {
        let out = filter(catalog(), &FilterCriteria::default());
        assert_eq!(ids(&out), vec!["a", "b", "d"]);
    }

    #[test]
    fn text_matches_any_field_case_insensitively() {
        let criteria = FilterCriteria {
            text: Some("  kUmA ".to_string()),
            ..FilterCriteria::default()
        };
        let out = filter(catalog(), &criteria);
        // "d" matches through its creator address.
        assert_eq!(ids(&out), vec!["a", "b", "d"]);
    }

    #[test]
    fn text_matches_address() {
        let criteria = FilterCriteria {
            text: Some("0XB".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(catalog(), &criteria)), vec!["b"]);
    }

    #[test]
    fn text_field_narrows_to_symbol() {
        let criteria = FilterCriteria {
            text: Some("bkuma".to_string()),
            text_field: TextField::Symbol,
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(catalog(), &criteria)), vec!["b"]);

        let criteria = FilterCriteria {
            text: Some("baby".to_string()),
            text_field: TextField::Symbol,
            ..FilterCriteria::default()
        };
        assert!(filter(catalog(), &criteria).is_empty());
    }

    #[test]
    fn blank_text_is_noop() {
        let criteria = FilterCriteria {
            text: Some("   ".to_string()),
            include_nsfw: true,
            ..FilterCriteria::default()
        };
        assert_eq!(filter(catalog(), &criteria).len(), 4);
    }

    #[test]
    fn include_nsfw_keeps_flagged_tokens() {
        let criteria = FilterCriteria {
            include_nsfw: true,
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(catalog(), &criteria)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn ranges_are_inclusive_and_missing_measures_count_as_zero() {
        let mut unknown = token("e", "Ghost", "GHOST", 0, 0);
        unknown.market_cap = None;
        unknown.volume_24h = None;
        let mut tokens = catalog();
        tokens.push(unknown);

        let criteria = FilterCriteria {
            market_cap_range: Range::new(Some(Decimal::from(200)), Some(Decimal::from(400))),
            volume_range: Range::new(None, Some(Decimal::from(20))),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(tokens.clone(), &criteria)), vec!["b"]);

        let criteria = FilterCriteria {
            market_cap_range: Range::new(None, Some(Decimal::zero())),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(tokens, &criteria)), vec!["e"]);
    }

    #[test]
    fn status_filter_runs_last() {
        let criteria = FilterCriteria {
            status: Some(TokenStatus::Finalized),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter(catalog(), &criteria)), vec!["d"]);
    }

    #[test]
    fn raising_min_never_grows_result() {
        let mut previous = usize::MAX;
        for min in [0, 100, 150, 200, 400, 401] {
            let criteria = FilterCriteria {
                include_nsfw: true,
                market_cap_range: Range::new(Some(Decimal::from(min)), None),
                ..FilterCriteria::default()
            };
            let count = filter(catalog(), &criteria).len();
            assert!(count <= previous, "min {} grew result", min);
            previous = count;
        }
        assert_eq!(previous, 0);
    }
}
