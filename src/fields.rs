//! Field splitting and numeric parsing helpers.
//!
//! Numeric header lines and data rows accept either commas (with optional
//! surrounding whitespace) or runs of whitespace as delimiters.

use crate::error::{NasError, Result};
use regex::Regex;
use std::sync::LazyLock;

static FIELD_DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*,\s*|\s+").expect("field delimiter pattern is valid")
});

/// Split a line on commas or whitespace runs, ignoring surrounding whitespace
pub fn split_fields(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    FIELD_DELIMITER.split(trimmed).collect()
}

/// Split a descriptor line on commas into at most `limit` trimmed parts
pub fn split_comma(line: &str, limit: usize) -> Vec<&str> {
    line.trim().splitn(limit, ',').map(str::trim).collect()
}

/// Parse an integer header field
pub fn parse_int(value: &str, line: usize, field: &str) -> Result<i64> {
    let trimmed = value.trim();
    trimmed
        .parse::<i64>()
        .or_else(|_| {
            // some producers write counts as "2.0"
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.fract() == 0.0 && v.is_finite())
                .map(|v| v as i64)
                .ok_or(())
        })
        .map_err(|_| NasError::invalid_field(line, field, "an integer", trimmed))
}

/// Parse a non-negative count header field
pub fn parse_count(value: &str, line: usize, field: &str) -> Result<usize> {
    let parsed = parse_int(value, line, field)?;
    usize::try_from(parsed)
        .map_err(|_| NasError::invalid_field(line, field, "a non-negative count", value.trim()))
}

/// Parse a floating point header field
pub fn parse_float(value: &str, line: usize, field: &str) -> Result<f64> {
    let trimmed = value.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| NasError::invalid_field(line, field, "a number", trimmed))
}
