//! Line splitting for raw file content.
//!
//! Line endings (LF or CRLF) are stripped and every line keeps its original
//! 1-based line number so later stages can report positions.

use crate::error::{NasError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Ordered lines of one source file, indexed from 1
#[derive(Debug, Clone, PartialEq)]
pub struct RawLines {
    lines: Vec<String>,
}

impl RawLines {
    /// Split text into lines
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }

    /// Read a whole file and split it into lines.
    ///
    /// The handle is dropped before returning, on success and failure alike.
    pub fn read(path: &Path) -> Result<Self> {
        let mut content = String::new();
        {
            let mut file = File::open(path).map_err(|source| NasError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            file.read_to_string(&mut content)
                .map_err(|source| NasError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        Ok(Self::from_text(&content))
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line by 1-based number
    pub fn get(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    /// Iterate `(line_number, line)` pairs starting after `skip` lines
    pub fn numbered_from(&self, skip: usize) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, line)| (i + 1, line.as_str()))
    }
}
