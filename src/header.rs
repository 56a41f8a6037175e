//! ICARTT / NASA Ames header parsing.
//!
//! Consumes exactly the number of header lines declared on line 1 and
//! produces a [`Header`]: fixed scalar fields, dates, the independent and
//! dependent variable descriptors, scale factors, missing-value sentinels and
//! the verbatim comment blocks. The declared count must match the structure
//! actually consumed.

pub mod comments;
pub mod grammar;

#[cfg(test)]
pub(crate) mod tests;

use crate::config::ParseConfig;
use crate::constants::SUPPORTED_FFI;
use crate::error::{NasError, Result};
use crate::fields::{parse_count, parse_float, parse_int, split_comma, split_fields};
use crate::lines::RawLines;
use crate::models::{FormatKind, HeaderKey, IndependentVariable, VariableDescriptor};
use chrono::NaiveDate;
use grammar::Grammar;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Parsed header of an ICARTT or NASA Ames FFI 1001 file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub format_kind: FormatKind,

    /// File Format Index from line 1
    pub ffi: i64,

    /// Optional format version token following the FFI (ICARTT v2)
    pub version: Option<String>,

    /// Header line count, as declared and as consumed
    pub n_header_lines: usize,

    /// Data lines following the header, trailing blank lines excluded
    pub n_data_lines: usize,

    /// Known scalar fields
    fields: BTreeMap<HeaderKey, String>,

    /// `KEY: value` comment fields with keys outside [`HeaderKey`]
    extra_fields: BTreeMap<String, String>,

    pub file_volume: u32,
    pub number_of_volumes: u32,

    /// UTC date on which data collection began
    pub start_date: NaiveDate,

    /// Date of data reduction or revision
    pub revision_date: NaiveDate,

    pub data_interval: Vec<f64>,

    pub independent: IndependentVariable,

    /// Scale factors, aligned with `variables`
    pub scale_factors: Vec<f64>,

    /// Missing-value sentinels, aligned with `variables`
    pub missing_values: Vec<f64>,

    pub variables: Vec<VariableDescriptor>,

    pub special_comments: Vec<String>,

    pub normal_comments: Vec<String>,

    /// ICARTT column-header line split into names, when present
    pub column_header: Option<Vec<String>>,
}

impl Header {
    /// Value of a known scalar field, empty when the file does not carry it
    pub fn field(&self, key: HeaderKey) -> &str {
        self.fields.get(&key).map(String::as_str).unwrap_or("")
    }

    /// Look up a field by name in the known fields, then the overflow fields
    pub fn get(&self, name: &str) -> Option<&str> {
        match HeaderKey::from_name(name) {
            Some(key) => self.fields.get(&key).map(String::as_str),
            None => self
                .extra_fields
                .get(&name.trim().to_uppercase())
                .map(String::as_str),
        }
    }

    /// Known fields present in the file
    pub fn fields(&self) -> &BTreeMap<HeaderKey, String> {
        &self.fields
    }

    /// Comment fields with keys outside the known set
    pub fn extra_fields(&self) -> &BTreeMap<String, String> {
        &self.extra_fields
    }

    /// All scalar fields keyed by name, known and overflow together
    pub fn scalar_fields(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str().to_string(), value.clone()))
            .chain(self.extra_fields.clone())
            .collect()
    }

    pub fn pi_name(&self) -> &str {
        self.field(HeaderKey::PiName)
    }

    pub fn organization(&self) -> &str {
        self.field(HeaderKey::Organization)
    }

    pub fn data_source(&self) -> &str {
        self.field(HeaderKey::DataSourceDescription)
    }

    pub fn mission(&self) -> &str {
        self.field(HeaderKey::MissionName)
    }

    /// Dependent variable names in declaration order
    pub fn variable_names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn variable(&self, name: &str) -> Option<&VariableDescriptor> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Declared missing-value sentinel of a variable
    pub fn missing_value(&self, name: &str) -> Option<f64> {
        self.variable(name).map(|v| self.missing_values[v.index])
    }

    /// Declared scale factor of a variable
    pub fn scale_factor(&self, name: &str) -> Option<f64> {
        self.variable(name).map(|v| self.scale_factors[v.index])
    }
}

/// Sequential reader over header lines that tracks the line number
struct HeaderCursor<'a> {
    raw: &'a RawLines,
    next: usize,
}

impl<'a> HeaderCursor<'a> {
    fn new(raw: &'a RawLines) -> Self {
        Self { raw, next: 1 }
    }

    fn next_line(&mut self, expected: &str) -> Result<(usize, &'a str)> {
        let number = self.next;
        let line = self.raw.get(number).ok_or_else(|| NasError::TruncatedHeader {
            line: number,
            expected: expected.to_string(),
        })?;
        self.next += 1;
        Ok((number, line))
    }

    fn consumed(&self) -> usize {
        self.next - 1
    }
}

/// Parse the header of `raw` according to the grammar for `kind`
pub fn parse_header(raw: &RawLines, kind: FormatKind, config: &ParseConfig) -> Result<Header> {
    let grammar = Grammar::for_kind(kind);
    let mut cursor = HeaderCursor::new(raw);

    // Line 1: NLHEAD, FFI[, version]
    let (number, line) = cursor.next_line("header line count and FFI")?;
    let tokens = split_fields(line);
    let nlhead = parse_count(tokens.first().copied().unwrap_or(""), number, "NLHEAD")?;
    let ffi = parse_int(tokens.get(1).copied().unwrap_or(""), number, "FFI")?;
    if ffi != SUPPORTED_FFI {
        return Err(NasError::UnsupportedFFI { found: ffi });
    }
    let version = tokens.get(2).map(|v| v.to_string());

    let mut fields = BTreeMap::new();
    for key in [
        HeaderKey::PiName,
        HeaderKey::Organization,
        HeaderKey::DataSourceDescription,
        HeaderKey::MissionName,
    ] {
        let (_, line) = cursor.next_line(key.as_str())?;
        fields.insert(key, line.trim().to_string());
    }

    // Line 6: volume numbers
    let (number, line) = cursor.next_line("file volume and number of volumes")?;
    let volume = split_fields(line);
    if volume.len() != 2 {
        return Err(NasError::invalid_field(
            number,
            "IVOL, NVOL",
            "two integers",
            line.trim(),
        ));
    }
    let file_volume = parse_volume(volume[0], number, "IVOL")?;
    let number_of_volumes = parse_volume(volume[1], number, "NVOL")?;

    // Line 7: start date and revision date
    let (number, line) = cursor.next_line("start and revision dates")?;
    let (start_date, revision_date) = parse_dates(line, number)?;

    // Line 8: data interval
    let (number, line) = cursor.next_line("data interval")?;
    let data_interval = split_fields(line)
        .into_iter()
        .map(|v| parse_float(v, number, "DX"))
        .collect::<Result<Vec<_>>>()?;
    if data_interval.is_empty() {
        return Err(NasError::invalid_field(number, "DX", "a number", line.trim()));
    }

    // Line 9: independent variable
    let (number, line) = cursor.next_line("independent variable descriptor")?;
    let (name, units, description) = grammar.split_descriptor(line);
    if name.is_empty() {
        return Err(NasError::invalid_field(
            number,
            "XNAME",
            "an independent variable name",
            line.trim(),
        ));
    }
    let independent = IndependentVariable {
        name: name.to_string(),
        units: units.to_string(),
        description: description.to_string(),
    };

    // Line 10: number of dependent variables
    let (number, line) = cursor.next_line("number of variables")?;
    let nvar = parse_count(line, number, "NV")?;
    // every variable needs at least its own descriptor line
    let remaining = raw.len().saturating_sub(cursor.consumed());
    if nvar > remaining {
        return Err(NasError::invalid_field(
            number,
            "NV",
            format!("at most {} variables for the remaining lines", remaining),
            line.trim(),
        ));
    }

    let scale_factors = read_values(&mut cursor, grammar, nvar, "VSCAL")?;
    let missing_values = read_values(&mut cursor, grammar, nvar, "VMISS")?;

    let mut variables = Vec::with_capacity(nvar);
    let mut seen = HashSet::new();
    for index in 0..nvar {
        let (number, line) = cursor.next_line("variable descriptor")?;
        let (name, units, description) = grammar.split_descriptor(line);
        if name.is_empty() {
            return Err(NasError::invalid_field(
                number,
                "VNAME",
                "a variable name",
                line.trim(),
            ));
        }
        if !seen.insert(name.to_string()) {
            return Err(NasError::DuplicateVariable {
                line: number,
                name: name.to_string(),
            });
        }
        variables.push(VariableDescriptor {
            name: name.to_string(),
            units: units.to_string(),
            description: description.to_string(),
            index,
        });
    }

    let special_comments = read_comment_block(&mut cursor, "NSCOML")?;
    let mut normal_comments = read_comment_block(&mut cursor, "NNCOML")?;

    let consumed = cursor.consumed();
    if consumed != nlhead {
        return Err(NasError::HeaderLineCountMismatch {
            declared: nlhead,
            consumed,
        });
    }

    let mut column_header = None;
    if grammar.has_column_header && config.extract_column_header {
        column_header = take_column_header(&mut normal_comments, &variables, &independent);
    }

    let mut extra_fields = BTreeMap::new();
    if config.extract_comment_fields {
        comments::collect_fields(&normal_comments, &mut fields, &mut extra_fields);
    }

    let n_data_lines = count_data_lines(raw, nlhead);

    debug!(
        "Parsed {} header: nlhead={}, nvar={}, data_lines={}",
        kind, nlhead, nvar, n_data_lines
    );

    Ok(Header {
        format_kind: kind,
        ffi,
        version,
        n_header_lines: nlhead,
        n_data_lines,
        fields,
        extra_fields,
        file_volume,
        number_of_volumes,
        start_date,
        revision_date,
        data_interval,
        independent,
        scale_factors,
        missing_values,
        variables,
        special_comments,
        normal_comments,
        column_header,
    })
}

fn parse_volume(value: &str, line: usize, field: &str) -> Result<u32> {
    let parsed = parse_count(value, line, field)?;
    u32::try_from(parsed).map_err(|_| NasError::invalid_field(line, field, "a volume number", value))
}

/// Parse `Y M D Y M D` into start and revision dates
fn parse_dates(line: &str, number: usize) -> Result<(NaiveDate, NaiveDate)> {
    let parts = split_fields(line);
    if parts.len() != 6 {
        return Err(NasError::InvalidDateFields {
            line: number,
            reason: format!(
                "expected six integers (start Y M D, revision Y M D), found '{}'",
                line.trim()
            ),
        });
    }
    let values = parts
        .iter()
        .map(|p| {
            p.parse::<i64>().map_err(|_| NasError::InvalidDateFields {
                line: number,
                reason: format!("'{}' is not an integer", p),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let start = make_date(&values[0..3], number, "start")?;
    let revision = make_date(&values[3..6], number, "revision")?;
    Ok((start, revision))
}

fn make_date(ymd: &[i64], number: usize, which: &str) -> Result<NaiveDate> {
    let invalid = || NasError::InvalidDateFields {
        line: number,
        reason: format!(
            "{} date {:04}-{:02}-{:02} is not a calendar date",
            which, ymd[0], ymd[1], ymd[2]
        ),
    };
    let year = i32::try_from(ymd[0]).map_err(|_| invalid())?;
    let month = u32::try_from(ymd[1]).map_err(|_| invalid())?;
    let day = u32::try_from(ymd[2]).map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Read `nvar` numeric values, wrapping across lines where the grammar allows
fn read_values(
    cursor: &mut HeaderCursor<'_>,
    grammar: &Grammar,
    nvar: usize,
    field: &str,
) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(nvar);
    let (mut number, mut line) = cursor.next_line(field)?;
    loop {
        for token in split_fields(line) {
            values.push(parse_float(token, number, field)?);
        }
        if values.len() >= nvar || !grammar.values_may_wrap {
            break;
        }
        (number, line) = cursor.next_line(field)?;
    }
    if values.len() != nvar {
        return Err(NasError::invalid_field(
            number,
            field,
            format!("{} values", nvar),
            format!("{} values", values.len()),
        ));
    }
    Ok(values)
}

/// Read a comment count line followed by that many comment lines
fn read_comment_block(cursor: &mut HeaderCursor<'_>, field: &str) -> Result<Vec<String>> {
    let (number, line) = cursor.next_line(field)?;
    let count = parse_count(line, number, field)?;
    (0..count)
        .map(|_| cursor.next_line("comment line").map(|(_, l)| l.to_string()))
        .collect()
}

/// Pop the trailing ICARTT column-header line when it names every column
fn take_column_header(
    normal_comments: &mut Vec<String>,
    variables: &[VariableDescriptor],
    independent: &IndependentVariable,
) -> Option<Vec<String>> {
    let last = normal_comments.last()?;
    let names: Vec<String> = split_comma(last, usize::MAX)
        .into_iter()
        .map(str::to_string)
        .collect();
    if names.len() != variables.len() + 1 {
        return None;
    }

    let declared = std::iter::once(independent.name.as_str())
        .chain(variables.iter().map(|v| v.name.as_str()));
    if !names.iter().map(String::as_str).eq(declared) {
        warn!(
            "Column header line '{}' differs from the declared variable names",
            last.trim()
        );
    }

    normal_comments.pop();
    Some(names)
}

/// Count lines after the header, ignoring trailing blank lines
fn count_data_lines(raw: &RawLines, nlhead: usize) -> usize {
    let last_content = raw
        .numbered_from(nlhead)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, _)| number)
        .last();
    last_content.map_or(0, |number| number - nlhead)
}
