//! Parsing of comma/semicolon-delimited form input.
//!
//! Values within a list are separated by commas; terms (lists of lists) by
//! semicolons. Surrounding whitespace is ignored and empty input yields an
//! empty list.

use crate::{CoreError, CoreResult};

/// Parse a comma-separated list of numbers, e.g. `"90, 85,88.5"`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidNumber`] if a token is not a finite number.
pub fn parse_values(input: &str, field: &'static str) -> CoreResult<Vec<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split(',')
        .map(|token| parse_number(token, field))
        .collect()
}

/// Parse semicolon-separated terms of comma-separated numbers,
/// e.g. `"80,82;85,87"`. Blank terms are skipped.
///
/// # Errors
///
/// Returns [`CoreError::InvalidNumber`] if any token is malformed.
pub fn parse_terms(input: &str, field: &'static str) -> CoreResult<Vec<Vec<f64>>> {
    input
        .split(';')
        .filter(|term| !term.trim().is_empty())
        .map(|term| parse_values(term, field))
        .collect()
}

/// Parse a comma-separated list of labels, trimming each one.
#[must_use]
pub fn parse_labels(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split(',').map(|s| s.trim().to_string()).collect()
}

fn parse_number(token: &str, field: &'static str) -> CoreResult<f64> {
    let token = token.trim();
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::InvalidNumber {
            field,
            input: token.to_string(),
        })
}
