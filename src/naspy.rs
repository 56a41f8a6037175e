//! Parsed-file facade.
//!
//! [`Naspy`] runs format detection, header parsing, data parsing and time
//! resolution in that order and stops at the first failure. A successful
//! parse yields an immutable [`ParsedFile`]; a failed one yields nothing.

use crate::config::{ColumnCase, ParseConfig};
use crate::data::parse_data;
use crate::detect::detect_format;
use crate::error::{NasError, Result};
use crate::header::{Header, parse_header};
use crate::lines::RawLines;
use crate::missing::{self, MissingValues};
use crate::models::{DataBlock, FormatKind};
use crate::time::TimeResolver;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Entry points for parsing ICARTT and NASA Ames files
pub struct Naspy;

impl Naspy {
    /// Parse a file from disk with default options
    pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedFile> {
        Self::parse_file_with_config(path, &ParseConfig::default())
    }

    pub fn parse_file_with_config(path: impl AsRef<Path>, config: &ParseConfig) -> Result<ParsedFile> {
        let path = path.as_ref();
        info!("Parsing file: {}", path.display());
        let raw = RawLines::read(path)?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::parse_lines(raw, source, config)
    }

    /// Parse in-memory text with default options
    pub fn parse_str(text: &str) -> Result<ParsedFile> {
        Self::parse_str_with_config(text, &ParseConfig::default())
    }

    pub fn parse_str_with_config(text: &str, config: &ParseConfig) -> Result<ParsedFile> {
        Self::parse_lines(RawLines::from_text(text), "<memory>".to_string(), config)
    }

    fn parse_lines(raw: RawLines, source: String, config: &ParseConfig) -> Result<ParsedFile> {
        let kind = detect_format(&raw)?;
        let header = parse_header(&raw, kind, config)?;
        let data = parse_data(&raw, &header)?;
        let time = TimeResolver::new(&header, &data)?;

        debug!(
            "{}: {} variables, {} rows, {} to {}",
            source,
            header.variables.len(),
            data.len(),
            time.start_time(),
            time.end_time()
        );

        Ok(ParsedFile {
            source,
            header,
            data,
            time,
            extra_missing_flags: config.extra_missing_flags.clone(),
        })
    }
}

/// One fully parsed ICARTT or NASA Ames file
#[derive(Debug, Clone)]
pub struct ParsedFile {
    source: String,
    header: Header,
    data: DataBlock,
    time: TimeResolver,
    extra_missing_flags: Vec<String>,
}

impl ParsedFile {
    /// File name the data came from, `<memory>` for parsed text
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn format_kind(&self) -> FormatKind {
        self.header.format_kind
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn data(&self) -> &DataBlock {
        &self.data
    }

    pub fn time(&self) -> &TimeResolver {
        &self.time
    }

    /// Dependent variable names in declaration order
    pub fn column_names(&self) -> Vec<String> {
        self.column_names_with(ColumnCase::AsIs, false)
    }

    /// Column names with casing applied, optionally led by the independent column
    pub fn column_names_with(&self, case: ColumnCase, include_independent: bool) -> Vec<String> {
        let independent = include_independent.then_some(self.header.independent.name.as_str());
        independent
            .into_iter()
            .chain(self.data.names.iter().map(String::as_str))
            .map(|name| case.apply(name))
            .collect()
    }

    /// Independent column values
    pub fn independent(&self) -> &[f64] {
        &self.data.independent
    }

    /// Raw values of a dependent column, sentinels included
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.data.column(name).ok_or_else(|| NasError::ColumnNotFound {
            name: name.to_string(),
        })
    }

    /// Per-column sentinel sets using the configured extra flags
    pub fn missing_values(&self) -> Vec<MissingValues> {
        missing::missing_values(&self.header, self.extra_missing_flags.as_slice())
    }

    /// Per-column sentinel sets using the given extra flags
    pub fn missing_values_with<S: AsRef<str>>(&self, flags: &[S]) -> Vec<MissingValues> {
        missing::missing_values(&self.header, flags)
    }

    /// A dependent column with its sentinels replaced by `None`
    pub fn masked_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        self.masked_column_with(name, self.extra_missing_flags.as_slice())
    }

    /// Like [`masked_column`](Self::masked_column) with explicit extra flags
    pub fn masked_column_with<S: AsRef<str>>(
        &self,
        name: &str,
        flags: &[S],
    ) -> Result<Vec<Option<f64>>> {
        let values = self.column(name)?;
        let sets = self.missing_values_with(flags);
        let set = sets
            .iter()
            .find(|s| s.column == name)
            .ok_or_else(|| NasError::ColumnNotFound {
                name: name.to_string(),
            })?;
        Ok(missing::mask(values, set))
    }
}

impl fmt::Display for ParsedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Data File (FFI = {})\n{}",
            self.header.format_kind, self.header.ffi, self.source
        )
    }
}
