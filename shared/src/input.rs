//! Parsing of raw form input into the numeric types the calculators expect
//!
//! Form fields arrive as free text. `parse_*` functions return an explicit
//! reason on failure and are used at submit time; `coerce_*` functions map
//! any failure to zero and back the live previews.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a raw form value could not be converted
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "value", rename_all = "snake_case")]
pub enum InputError {
    #[error("value is required")]
    Empty,

    #[error("'{0}' is not a number")]
    NotNumeric(String),

    #[error("value cannot be negative")]
    Negative,

    #[error("value must be a whole number")]
    Fractional,

    #[error("value is too large")]
    TooLarge,
}

fn parse_decimal(raw: &str) -> Result<Decimal, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    // Accept a decimal comma ("0,15") when no dot is present
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized).map_err(|_| {
        let digits = normalized.trim_start_matches('+');
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            InputError::TooLarge
        } else {
            InputError::NotNumeric(trimmed.to_string())
        }
    })
}

/// Parse a non-negative whole count (crates, birds, males).
///
/// Only plain digits are accepted. Separators are never guessed at, so
/// "1,000" and "1.000" are rejected rather than read as 1.
pub fn parse_count(raw: &str) -> Result<u32, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        // "2.5" is a number, just not a count
        return Err(match Decimal::from_str(trimmed) {
            Ok(value) if value.is_sign_negative() && !value.is_zero() => InputError::Negative,
            Ok(value) if !value.fract().is_zero() => InputError::Fractional,
            _ => InputError::NotNumeric(trimmed.to_string()),
        });
    }
    if negative && digits.chars().any(|c| c != '0') {
        return Err(InputError::Negative);
    }

    digits.parse::<u32>().map_err(|_| InputError::TooLarge)
}

/// Parse a non-negative mass in kilograms. A lone comma is read as the
/// decimal separator ("0,15").
pub fn parse_kg(raw: &str) -> Result<Decimal, InputError> {
    let value = parse_decimal(raw)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(InputError::Negative);
    }
    Ok(value)
}

/// Parse an optional field: blank input is `None`, anything else must parse
pub fn parse_optional_count(raw: Option<&str>) -> Result<Option<u32>, InputError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_count(value).map(Some),
    }
}

/// Lenient count for live previews: absent or invalid input is 0
pub fn coerce_count(raw: Option<&str>) -> u32 {
    raw.and_then(|value| parse_count(value).ok()).unwrap_or(0)
}

/// Lenient mass for live previews: absent or invalid input is 0
pub fn coerce_kg(raw: Option<&str>) -> Decimal {
    raw.and_then(|value| parse_kg(value).ok())
        .unwrap_or(Decimal::ZERO)
}
