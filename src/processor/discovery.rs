//! File discovery for batch parsing
//!
//! Finds ICARTT and NASA Ames files either by walking a directory tree and
//! matching extensions, or by expanding a glob pattern.

use crate::constants::{AMES_EXTENSIONS, ICARTT_EXTENSIONS};
use crate::error::{NasError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directory walker matching data file extensions
#[derive(Debug, Clone)]
pub struct FileDiscovery {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FileDiscovery {
    /// Discover files with the usual ICARTT and NASA Ames extensions
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let extensions = ICARTT_EXTENSIONS
            .iter()
            .chain(AMES_EXTENSIONS)
            .map(|ext| ext.to_string())
            .collect();
        Self {
            root: root.into(),
            extensions,
        }
    }

    /// Replace the matched extensions (compared case-insensitively, no dot)
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and return matching files in sorted order
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let metadata = std::fs::metadata(&self.root)?;
        if !metadata.is_dir() {
            return Err(NasError::Configuration {
                message: format!("Input path is not a directory: {}", self.root.display()),
            });
        }

        debug!("Searching for data files in: {}", self.root.display());

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && self.matches(path) {
                files.push(path.to_path_buf());
            }
        }
        files.sort();

        debug!("Found {} data files", files.len());
        Ok(files)
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// Expand a glob pattern into the matching regular files, sorted
pub fn discover_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| NasError::Configuration {
        message: format!("Invalid glob pattern '{}': {}", pattern, e),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable glob match: {}", e),
        }
    }
    files.sort();
    Ok(files)
}
