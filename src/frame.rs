//! Polars DataFrame adapter.
//!
//! Builds a [`DataFrame`] from a [`ParsedFile`]: one Float64 column per
//! file column, optional sentinel masking and scale factors, and an optional
//! millisecond `DATETIME` column placed first.

use crate::config::{DatetimeSource, FrameOptions};
use crate::constants::DATETIME_COLUMN;
use crate::error::{NasError, Result};
use crate::missing::{self, MissingValues};
use crate::naspy::ParsedFile;
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Convert a parsed file into a DataFrame
pub fn to_dataframe(parsed: &ParsedFile, options: &FrameOptions) -> Result<DataFrame> {
    let header = parsed.header();
    let data = parsed.data();
    let sets = missing::missing_values(header, options.extra_missing_flags.as_slice());

    check_unique_names(parsed, options)?;

    let mut columns = Vec::with_capacity(data.names.len() + 2);

    if options.make_datetime {
        columns.push(datetime_column(parsed, options, &sets)?);
    }

    let dropped = dropped_source(parsed, options);
    if dropped != Some(header.independent.name.as_str()) {
        let independent_name = options.case.apply(&header.independent.name);
        columns.push(Column::new(
            independent_name.as_str().into(),
            data.independent.clone(),
        ));
    }

    for (index, (name, values)) in data.iter().enumerate() {
        if dropped == Some(name) {
            continue;
        }

        let scale = if options.apply_scale_factors {
            header.scale_factors[index]
        } else {
            1.0
        };
        let column_name = options.case.apply(name);

        let column = if options.mask_missing {
            let masked: Vec<Option<f64>> = missing::mask(values, &sets[index])
                .into_iter()
                .map(|v| v.map(|v| v * scale))
                .collect();
            Column::new(column_name.as_str().into(), masked)
        } else {
            let scaled: Vec<f64> = values.iter().map(|v| v * scale).collect();
            Column::new(column_name.as_str().into(), scaled)
        };
        columns.push(column);
    }

    let df = DataFrame::new(columns)?;
    debug!(
        "Built DataFrame for {}: {} rows x {} columns",
        parsed.source(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Source column replaced by the datetime column, if it is being dropped
fn dropped_source<'a>(parsed: &'a ParsedFile, options: &'a FrameOptions) -> Option<&'a str> {
    if !(options.make_datetime && options.drop_datetime_source) {
        return None;
    }
    match &options.datetime_source {
        DatetimeSource::Independent => Some(parsed.header().independent.name.as_str()),
        DatetimeSource::Column(name) => Some(name.as_str()),
    }
}

/// Reject source names that collide once the requested case is applied
fn check_unique_names(parsed: &ParsedFile, options: &FrameOptions) -> Result<()> {
    let dropped = dropped_source(parsed, options);
    let mut seen: HashMap<String, &str> = HashMap::new();
    if options.make_datetime {
        seen.insert(DATETIME_COLUMN.to_string(), DATETIME_COLUMN);
    }
    let sources = std::iter::once(parsed.header().independent.name.as_str())
        .chain(parsed.data().names.iter().map(String::as_str))
        .filter(|source| dropped != Some(*source));
    for source in sources {
        let name = options.case.apply(source);
        if let Some(first) = seen.insert(name.clone(), source) {
            return Err(NasError::DuplicateColumn {
                name,
                first: first.to_string(),
                second: source.to_string(),
            });
        }
    }
    Ok(())
}

/// Millisecond timestamps from the chosen offset column; sentinels become null
fn datetime_column(
    parsed: &ParsedFile,
    options: &FrameOptions,
    sets: &[MissingValues],
) -> Result<Column> {
    let time = parsed.time();
    let millis: Vec<Option<i64>> = match &options.datetime_source {
        DatetimeSource::Independent => time
            .timestamps()
            .into_iter()
            .map(|ts| ts.map(|ts| ts.and_utc().timestamp_millis()))
            .collect(),
        DatetimeSource::Column(name) => {
            let values = parsed.column(name)?;
            let set = sets
                .iter()
                .find(|s| &s.column == name)
                .ok_or_else(|| NasError::ColumnNotFound { name: name.clone() })?;
            values
                .iter()
                .map(|v| {
                    if set.is_missing(*v) {
                        return None;
                    }
                    time.offset(*v)
                        .ok()
                        .map(|ts| ts.and_utc().timestamp_millis())
                })
                .collect()
        }
    };

    let column = Column::new(DATETIME_COLUMN.into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    Ok(column)
}

impl ParsedFile {
    /// Convert into a polars DataFrame
    pub fn to_dataframe(&self, options: &FrameOptions) -> Result<DataFrame> {
        to_dataframe(self, options)
    }
}
