//! Conversion of raw query-string values into typed engine inputs.
//!
//! Every parameter arrives as an optional string. Optional numeric filters and flags degrade to
//! "absent" on bad input; enumerations reject unknown values.

use crate::domain::Decimal;
use crate::engine::clamp_limit;
use crate::error::AppError;
use std::str::FromStr;

/// Treat empty and whitespace-only values as absent.
pub fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Page size: malformed values fall back to `default`, then clamp to `[1, 50]`.
pub fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    clamp_limit(present(raw).and_then(|s| s.parse::<i64>().ok()), default)
}

/// Only a case-insensitive `true` enables a flag.
pub fn parse_flag(raw: Option<&str>) -> bool {
    present(raw).is_some_and(|s| s.eq_ignore_ascii_case("true"))
}

/// Numeric range bound; unparseable input is treated as no bound.
pub fn parse_bound(raw: Option<&str>) -> Option<Decimal> {
    present(raw).and_then(Decimal::parse_lenient)
}

/// Parse an enumerated parameter, rejecting unknown values with a 400.
pub fn parse_choice<T: FromStr + Default>(
    raw: Option<&str>,
    name: &str,
    allowed: &str,
) -> Result<T, AppError> {
    match present(raw) {
        None => Ok(T::default()),
        Some(s) => T::from_str(s)
            .map_err(|_| AppError::BadRequest(format!("{} must be one of: {}", name, allowed))),
    }
}
