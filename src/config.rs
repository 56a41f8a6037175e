//! Configuration for parsing, column naming and DataFrame conversion.
//!
//! Follows a plain-struct-with-builder layout: every option has a default
//! and a `with_*` method, and all structures serialize with serde so they
//! can be stored next to processing scripts.

use crate::constants::DEFAULT_EXTRA_MISSING_FLAGS;
use serde::{Deserialize, Serialize};

/// Case applied to column names when they are returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnCase {
    /// Names exactly as declared in the file
    #[default]
    AsIs,
    Upper,
    Lower,
}

impl ColumnCase {
    pub fn apply(&self, name: &str) -> String {
        match self {
            ColumnCase::AsIs => name.to_string(),
            ColumnCase::Upper => name.to_uppercase(),
            ColumnCase::Lower => name.to_lowercase(),
        }
    }
}

/// Options controlling header interpretation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Record `KEY: value` normal comment lines as header fields
    pub extract_comment_fields: bool,

    /// Split the trailing ICARTT column-header line out of the normal comments
    pub extract_column_header: bool,

    /// Header fields whose values also mark missing data
    pub extra_missing_flags: Vec<String>,

    /// Worker count for batch parsing
    pub workers: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            extract_comment_fields: true,
            extract_column_header: true,
            extra_missing_flags: DEFAULT_EXTRA_MISSING_FLAGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            workers: num_cpus::get().max(1),
        }
    }
}

impl ParseConfig {
    /// Keep normal comments verbatim only
    pub fn without_comment_fields(mut self) -> Self {
        self.extract_comment_fields = false;
        self
    }

    /// Leave the ICARTT column-header line inside the normal comments
    pub fn without_column_header(mut self) -> Self {
        self.extract_column_header = false;
        self
    }

    /// Replace the extra missing-value flag field names
    pub fn with_extra_missing_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_missing_flags = flags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the batch worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

/// Which column the derived timestamp column is computed from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatetimeSource {
    /// The independent (first) column
    #[default]
    Independent,
    /// A dependent column holding offsets in the independent variable's units
    Column(String),
}

/// Options for building a polars DataFrame from a parsed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameOptions {
    /// Case applied to the column names; names that only differ in case
    /// need `AsIs`
    pub case: ColumnCase,

    /// Replace missing-value sentinels with nulls
    pub mask_missing: bool,

    /// Also treat the values of these header fields as missing
    pub extra_missing_flags: Vec<String>,

    /// Multiply dependent columns by their declared scale factors
    pub apply_scale_factors: bool,

    /// Add a datetime column derived from the start date
    pub make_datetime: bool,

    /// Column the datetime offsets come from
    pub datetime_source: DatetimeSource,

    /// Drop the source column once the datetime column has been derived
    pub drop_datetime_source: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            case: ColumnCase::Upper,
            mask_missing: true,
            extra_missing_flags: DEFAULT_EXTRA_MISSING_FLAGS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            apply_scale_factors: false,
            make_datetime: true,
            datetime_source: DatetimeSource::Independent,
            drop_datetime_source: false,
        }
    }
}

impl FrameOptions {
    /// Plain numeric table: sentinels kept, no datetime column
    pub fn raw() -> Self {
        Self {
            mask_missing: false,
            make_datetime: false,
            ..Self::default()
        }
    }

    pub fn with_case(mut self, case: ColumnCase) -> Self {
        self.case = case;
        self
    }

    pub fn with_mask_missing(mut self, mask: bool) -> Self {
        self.mask_missing = mask;
        self
    }

    pub fn with_extra_missing_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_missing_flags = flags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scale_factors(mut self) -> Self {
        self.apply_scale_factors = true;
        self
    }

    pub fn with_datetime(mut self, make_datetime: bool) -> Self {
        self.make_datetime = make_datetime;
        self
    }

    /// Derive the datetime column from a named dependent column
    pub fn with_datetime_column(mut self, name: impl Into<String>) -> Self {
        self.make_datetime = true;
        self.datetime_source = DatetimeSource::Column(name.into());
        self
    }

    pub fn dropping_datetime_source(mut self) -> Self {
        self.drop_datetime_source = true;
        self
    }
}
