//! ICARTT and NASA Ames FFI 1001 parser
//!
//! Reads airborne and ground-based atmospheric instrument data files in the
//! ICARTT (comma delimited) and NASA Ames FFI 1001 (whitespace delimited)
//! layouts into a typed header, columnar data and resolved timestamps.
//!
//! This library provides tools for:
//! - Detecting the layout of a file from its first header lines
//! - Parsing the header with exact line-count validation
//! - Parsing the data block with row-level error reporting
//! - Resolving start, end and per-row timestamps
//! - Masking missing-value sentinels and building polars DataFrames
//! - Parsing whole campaign directories concurrently
//!
//! ```no_run
//! use nastools::{FrameOptions, Naspy};
//!
//! let parsed = Naspy::parse_file("DC8-O3_20080401_R0.ict")?;
//! println!("{}", parsed);
//! let df = parsed.to_dataframe(&FrameOptions::default())?;
//! # Ok::<(), nastools::NasError>(())
//! ```

pub mod config;
pub mod constants;
pub mod data;
pub mod detect;
pub mod error;
pub mod fields;
pub mod frame;
pub mod header;
pub mod lines;
pub mod missing;
pub mod models;
pub mod naspy;
pub mod processor;
pub mod time;

// Re-export commonly used types
pub use config::{ColumnCase, DatetimeSource, FrameOptions, ParseConfig};
pub use error::{NasError, Result};
pub use header::Header;
pub use missing::MissingValues;
pub use models::{BatchStats, DataBlock, FormatKind, HeaderKey, IndependentVariable, VariableDescriptor};
pub use naspy::{Naspy, ParsedFile};
pub use processor::BatchProcessor;
pub use time::TimeResolver;
