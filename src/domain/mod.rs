//! Domain types for the token discovery API.
//!
//! This module provides:
//! - Lossless numeric handling via Decimal wrapper
//! - Domain primitives: TokenId, Address, TokenStatus
//! - The Token record with its camelCase JSON representation

pub mod decimal;
pub mod primitives;
pub mod token;

pub use decimal::Decimal;
pub use primitives::{Address, StatusParseError, TokenId, TokenStatus};
pub use token::{Token, TokenCounts};
