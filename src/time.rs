//! Start/end timestamps derived from the header dates and the independent column.
//!
//! Timestamps are naive and follow the UTC convention of both formats. The
//! `*_in` accessors relabel them with a caller-supplied time zone.

use crate::constants::time_units;
use crate::error::{NasError, Result};
use crate::header::Header;
use crate::models::DataBlock;
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use std::fmt;

/// Time accessors for one parsed file
#[derive(Debug, Clone, PartialEq)]
pub struct TimeResolver {
    start: NaiveDateTime,
    seconds_per_unit: f64,
    offsets: Vec<f64>,
    max_offset: f64,
}

impl TimeResolver {
    pub fn new(header: &Header, data: &DataBlock) -> Result<Self> {
        let seconds_per_unit = seconds_per_unit(&header.independent.name, &header.independent.units)?;
        let start = header.start_date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            NasError::InvalidDateFields {
                line: crate::constants::lines::DATES,
                reason: format!("start date {} has no midnight", header.start_date),
            }
        })?;

        let max_offset = data.max_independent().unwrap_or(0.0);
        let resolver = Self {
            start,
            seconds_per_unit,
            offsets: data.independent.clone(),
            max_offset,
        };
        // end must be representable
        resolver.offset(max_offset)?;
        Ok(resolver)
    }

    /// Midnight of the declared collection start date
    pub fn start_time(&self) -> NaiveDateTime {
        self.start
    }

    /// Start time plus the largest independent value
    pub fn end_time(&self) -> NaiveDateTime {
        self.offset(self.max_offset).unwrap_or(self.start)
    }

    /// Timestamp of the first data row
    pub fn first_time(&self) -> Option<NaiveDateTime> {
        self.offsets.first().and_then(|v| self.offset(*v).ok())
    }

    /// Timestamp of the last data row
    pub fn last_time(&self) -> Option<NaiveDateTime> {
        self.offsets.last().and_then(|v| self.offset(*v).ok())
    }

    /// Per-row timestamps; rows whose offset is not finite yield `None`
    pub fn timestamps(&self) -> Vec<Option<NaiveDateTime>> {
        self.offsets.iter().map(|v| self.offset(*v).ok()).collect()
    }

    /// Timestamp for an arbitrary offset in the independent variable's units
    pub fn offset(&self, value: f64) -> Result<NaiveDateTime> {
        let micros = value * self.seconds_per_unit * 1_000_000.0;
        let overflow = || NasError::InvalidDateFields {
            line: crate::constants::lines::DATES,
            reason: format!("offset {} from {} is out of range", value, self.start),
        };
        if !micros.is_finite() || micros.abs() > i64::MAX as f64 {
            return Err(overflow());
        }
        self.start
            .checked_add_signed(Duration::microseconds(micros.round() as i64))
            .ok_or_else(overflow)
    }

    /// Seconds represented by one unit of the independent variable
    pub fn seconds_per_unit(&self) -> f64 {
        self.seconds_per_unit
    }

    pub fn start_time_utc(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.start)
    }

    pub fn end_time_utc(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.end_time())
    }

    /// Start time relabelled as wall-clock time in `tz`
    pub fn start_time_in<Tz: TimeZone + fmt::Debug>(&self, tz: &Tz) -> Result<DateTime<Tz>> {
        relabel(self.start, tz)
    }

    /// End time relabelled as wall-clock time in `tz`
    pub fn end_time_in<Tz: TimeZone + fmt::Debug>(&self, tz: &Tz) -> Result<DateTime<Tz>> {
        relabel(self.end_time(), tz)
    }
}

fn relabel<Tz: TimeZone + fmt::Debug>(naive: NaiveDateTime, tz: &Tz) -> Result<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => Err(NasError::NonexistentLocalTime {
            timestamp: naive.to_string(),
            zone: format!("{:?}", tz),
        }),
    }
}

/// Interpret the declared independent-variable units.
///
/// Only the first word counts, so "seconds from 00:00 UT" reads as seconds.
/// Empty units default to seconds; anything unrecognised is an error.
pub fn seconds_per_unit(variable: &str, units: &str) -> Result<f64> {
    let word = units
        .split(|c: char| c.is_whitespace() || c == '(' || c == ')')
        .find(|w| !w.is_empty())
        .map(str::to_lowercase);

    let Some(word) = word else {
        return Ok(1.0);
    };

    let word = word.as_str();
    if time_units::SECONDS.contains(&word) {
        Ok(1.0)
    } else if time_units::MINUTES.contains(&word) {
        Ok(time_units::SECONDS_PER_MINUTE)
    } else if time_units::HOURS.contains(&word) {
        Ok(time_units::SECONDS_PER_HOUR)
    } else if time_units::DAYS.contains(&word) {
        Ok(time_units::SECONDS_PER_DAY)
    } else {
        Err(NasError::UnsupportedTimeUnits {
            variable: variable.to_string(),
            units: units.to_string(),
        })
    }
}
