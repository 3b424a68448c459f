//! Ranking assembler for leaderboard views.

use crate::domain::Token;

/// A token with its 1-based leaderboard position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedToken {
    pub rank: u32,
    pub token: Token,
}

/// Assign dense ranks to an already sorted sequence, keeping at most `limit` entries.
///
/// Ranks are `1..=n` with no gaps or repeats; ties were resolved by the ordering that
/// produced `sorted`.
pub fn assemble(sorted: Vec<Token>, limit: usize) -> Vec<RankedToken> {
    sorted
        .into_iter()
        .take(limit)
        .zip(1u32..)
        .map(|(token, rank)| RankedToken { rank, token })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Address, Decimal, TokenId, TokenStatus};
    use crate::engine::query::LeaderboardMode;
    use crate::engine::sort::TokenOrdering;

    fn token(id: &str, mcap: i64) -> Token {
        let mut t = Token::new(
            TokenId::new(id.to_string()),
            Address::new(format!("0x{}", id)),
            id,
            id,
            TokenStatus::Active,
        );
        t.market_cap = Some(Decimal::from(mcap));
        t
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(assemble(Vec::new(), 3).is_empty());
    }

    #[test]
    fn ranks_are_dense_even_with_ties() {
        let sorted = TokenOrdering::for_leaderboard(LeaderboardMode::Top).sort(vec![
            token("b", 2),
            token("a", 2),
            token("c", 2),
            token("d", 1),
        ]);
        let ranked = assemble(sorted, 10);
        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        let ids: Vec<&str> = ranked.iter().map(|r| r.token.id.as_str()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn limit_truncates_after_ranking() {
        let sorted = TokenOrdering::for_leaderboard(LeaderboardMode::Top).sort(vec![
            token("a", 7),
            token("b", 2),
            token("c", 9),
            token("d", 2),
            token("e", 5),
        ]);
        let ranked = assemble(sorted, 3);
        let caps: Vec<String> = ranked
            .iter()
            .map(|r| r.token.market_cap_or_zero().to_canonical_string())
            .collect();
        assert_eq!(caps, vec!["9", "7", "5"]);
        assert_eq!(ranked.last().map(|r| r.rank), Some(3));
    }
}
