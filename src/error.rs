//! Error handling for ICARTT / NASA Ames parsing operations.
//!
//! Every structural failure carries the absolute 1-based line number of the
//! offending line together with what was expected and what was found, so the
//! raw file can be inspected and fixed by hand.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Unable to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unrecognized format at line {line}: {reason}")]
    UnrecognizedFormat { line: usize, reason: String },

    #[error("Unsupported FFI {found} at line 1 (only FFI 1001 is supported)")]
    UnsupportedFFI { found: i64 },

    #[error(
        "Header line count mismatch: line 1 declares {declared} header lines but the header structure spans {consumed}"
    )]
    HeaderLineCountMismatch { declared: usize, consumed: usize },

    #[error("File ends inside the header at line {line}: expected {expected}")]
    TruncatedHeader { line: usize, expected: String },

    #[error("Invalid header field '{field}' at line {line}: expected {expected}, found '{found}'")]
    InvalidHeaderField {
        line: usize,
        field: String,
        expected: String,
        found: String,
    },

    #[error("Duplicate variable name '{name}' at line {line}")]
    DuplicateVariable { line: usize, name: String },

    #[error("Data row at line {line} has {found} fields, expected {expected}")]
    DataRowFieldCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Non-numeric value '{value}' for column '{column}' at line {line}")]
    DataCoercionError {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Invalid date fields at line {line}: {reason}")]
    InvalidDateFields { line: usize, reason: String },

    #[error(
        "Unsupported units '{units}' for independent variable '{variable}' (expected seconds, minutes, hours or days)"
    )]
    UnsupportedTimeUnits { variable: String, units: String },

    #[error("Local time {timestamp} does not exist in time zone {zone}")]
    NonexistentLocalTime { timestamp: String, zone: String },

    #[error("Column not found: {name}")]
    ColumnNotFound { name: String },

    #[error("Columns '{first}' and '{second}' both map to '{name}'; use ColumnCase::AsIs to keep them apart")]
    DuplicateColumn {
        name: String,
        first: String,
        second: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Batch task failed for file: {path} - {reason}")]
    TaskFailed { path: PathBuf, reason: String },
}

impl NasError {
    /// Line number the error points at, when it refers to a position in the file
    pub fn line(&self) -> Option<usize> {
        match self {
            NasError::UnrecognizedFormat { line, .. }
            | NasError::TruncatedHeader { line, .. }
            | NasError::InvalidHeaderField { line, .. }
            | NasError::DuplicateVariable { line, .. }
            | NasError::DataRowFieldCountMismatch { line, .. }
            | NasError::DataCoercionError { line, .. }
            | NasError::InvalidDateFields { line, .. } => Some(*line),
            NasError::UnsupportedFFI { .. } => Some(1),
            _ => None,
        }
    }

    pub(crate) fn invalid_field(
        line: usize,
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        NasError::InvalidHeaderField {
            line,
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NasError>;
