//! Format detection from the first header lines.
//!
//! The delimiter on line 1 picks the candidate grammar (comma for ICARTT,
//! whitespace for NASA Ames). The candidate is accepted only when the volume
//! line carries two integers and the dates line carries six.

use crate::constants::lines;
use crate::error::{NasError, Result};
use crate::fields::split_fields;
use crate::lines::RawLines;
use crate::models::FormatKind;
use tracing::debug;

/// Decide which grammar applies to the given lines
pub fn detect_format(raw: &RawLines) -> Result<FormatKind> {
    let first = raw
        .get(lines::FIRST)
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| unrecognized(lines::FIRST, "missing header line count"))?;

    let tokens = split_fields(first);
    let nlhead = tokens[0];
    if nlhead.parse::<u32>().is_err() {
        return Err(unrecognized(
            lines::FIRST,
            format!("expected an integer header line count, found '{}'", nlhead),
        ));
    }
    match tokens.get(1) {
        Some(ffi) if ffi.parse::<i64>().is_ok() => {}
        Some(ffi) => {
            return Err(unrecognized(
                lines::FIRST,
                format!("expected an integer FFI after the header line count, found '{}'", ffi),
            ));
        }
        None => {
            return Err(unrecognized(
                lines::FIRST,
                "expected an FFI after the header line count",
            ));
        }
    }

    let candidate = if first.contains(',') {
        FormatKind::Icartt
    } else {
        FormatKind::Ames1001
    };

    check_integer_line(raw, lines::VOLUME, 2, "file volume and number of volumes")?;
    check_integer_line(raw, lines::DATES, 6, "start date and revision date (six integers)")?;

    debug!("Detected {} layout from line 1 '{}'", candidate, first.trim());
    Ok(candidate)
}

fn check_integer_line(raw: &RawLines, number: usize, count: usize, what: &str) -> Result<()> {
    let line = raw
        .get(number)
        .ok_or_else(|| unrecognized(number, format!("file ends before the {} line", what)))?;
    let fields = split_fields(line);
    let all_integers = fields.iter().all(|f| f.parse::<i64>().is_ok());
    if fields.len() != count || !all_integers {
        return Err(unrecognized(
            number,
            format!("expected {}, found '{}'", what, line.trim()),
        ));
    }
    Ok(())
}

fn unrecognized(line: usize, reason: impl Into<String>) -> NasError {
    NasError::UnrecognizedFormat {
        line,
        reason: reason.into(),
    }
}
