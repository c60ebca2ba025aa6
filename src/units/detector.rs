use crate::units::error::{Result, UnitError};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Number (optional decimal, optional scientific notation), optional
    /// whitespace, then a unit identifier.
    /// Examples: "100 g", "2.5kg", "1e3 ml", "-3 floz"
    static ref AMOUNT_PATTERN: Regex = Regex::new(
        r"^(-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)\s*([A-Za-z][A-Za-z_\-]*)$"
    ).unwrap();
}

/// Check if a string looks like an amount with a unit
pub fn looks_like_amount(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return false;
    }
    AMOUNT_PATTERN.is_match(trimmed)
}

/// Split "12.5 oz" into its value and unit identifier
pub fn parse_amount(s: &str) -> Result<(f64, String)> {
    let trimmed = s.trim();
    let caps = AMOUNT_PATTERN
        .captures(trimmed)
        .ok_or_else(|| UnitError::ParseError(format!("Not an amount with a unit: '{}'", s)))?;

    let value = parse_value(&caps[1])?;
    Ok((value, caps[2].to_string()))
}

/// Parse a bare number
pub fn parse_value(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|e| UnitError::ParseError(format!("Failed to parse value '{}': {}", s, e)))
}
