//! Value parsing and display formatting.
//!
//! Catalog value fields arrive as JSON strings (`"1.2m"`, `"450k"`, `"1,234"`,
//! `"N/A"`), bare numbers, or null. [`parse_value`] turns any of them into a
//! [`Decimal`]; [`format_value`] renders a decimal with thousands grouping.

use crate::domain::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const THOUSAND: i64 = 1_000;
const MILLION: i64 = 1_000_000;

/// A value field exactly as the catalog delivered it.
///
/// Kept verbatim on item instances so persisted snapshots round-trip the
/// catalog's own representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// `null` or absent.
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn text(s: impl Into<String>) -> Self {
        RawValue::Text(s.into())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueParseError {
    #[error("value is not numeric: {0:?}")]
    NotNumeric(String),
    #[error("value is not a finite number")]
    NonFinite,
    #[error("value out of range: {0:?}")]
    Overflow(String),
}

/// Parse a raw catalog value.
///
/// Missing values and `"N/A"` (any case) are 0. A trailing `k` multiplies by
/// 1,000 and a trailing `m` by 1,000,000. Thousands separators are stripped
/// before anything else is looked at.
///
/// # Errors
/// Returns [`ValueParseError`] when the text is not a number after stripping
/// separators and suffix.
pub fn parse_value(raw: &RawValue) -> Result<Decimal, ValueParseError> {
    match raw {
        RawValue::Missing => Ok(Decimal::zero()),
        RawValue::Number(n) => Decimal::from_f64(*n).ok_or(ValueParseError::NonFinite),
        RawValue::Text(s) => parse_value_str(s),
    }
}

/// Parse a value written as text, e.g. `"1.2m"`.
pub fn parse_value_str(input: &str) -> Result<Decimal, ValueParseError> {
    let stripped: String = input.chars().filter(|c| *c != ',').collect();
    let lowered = stripped.trim().to_ascii_lowercase();

    if lowered == "n/a" {
        return Ok(Decimal::zero());
    }

    let (number, multiplier) = if let Some(rest) = lowered.strip_suffix('k') {
        (rest, THOUSAND)
    } else if let Some(rest) = lowered.strip_suffix('m') {
        (rest, MILLION)
    } else {
        (lowered.as_str(), 1)
    };

    let base = Decimal::from_str_canonical(number.trim())
        .map_err(|_| ValueParseError::NotNumeric(input.to_string()))?;

    base.checked_mul(Decimal::from_i64(multiplier))
        .ok_or_else(|| ValueParseError::Overflow(input.to_string()))
}

/// Aggregation contract: an unparseable value counts as 0.
///
/// The failure is logged so malformed catalog data stays visible in
/// diagnostics even though the total degrades silently.
pub fn parse_value_or_zero(raw: &RawValue) -> Decimal {
    match parse_value(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "unparseable item value, counting as zero");
            Decimal::zero()
        }
    }
}

/// Render a value with comma thousands grouping and at most three fraction
/// digits. Zero renders as `"0"`.
pub fn format_value(value: Decimal) -> String {
    let rounded = value.inner().round_dp(3).normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    if negative {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
