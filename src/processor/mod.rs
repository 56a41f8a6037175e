//! Concurrent batch parsing.
//!
//! Parses many files at once: each file is parsed on the blocking pool,
//! concurrency is bounded by a semaphore sized from the worker count, and
//! one file failing never stops the others.

pub mod discovery;

#[cfg(test)]
pub mod tests;

use self::discovery::{FileDiscovery, discover_glob};

use crate::config::ParseConfig;
use crate::error::{NasError, Result};
use crate::models::BatchStats;
use crate::naspy::{Naspy, ParsedFile};

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task;
use tracing::{info, warn};

/// Outcome of parsing one file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<ParsedFile>,
}

/// Per-file outcomes in input order, plus summary statistics
#[derive(Debug)]
pub struct BatchOutcome {
    pub files: Vec<FileOutcome>,
    pub stats: BatchStats,
}

impl BatchOutcome {
    /// Successfully parsed files
    pub fn parsed(&self) -> impl Iterator<Item = &ParsedFile> {
        self.files.iter().filter_map(|f| f.result.as_ref().ok())
    }

    /// Files that failed, with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &NasError)> {
        self.files
            .iter()
            .filter_map(|f| f.result.as_ref().err().map(|e| (f.path.as_path(), e)))
    }
}

/// Parses batches of files with a shared configuration
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    config: ParseConfig,
}

impl BatchProcessor {
    pub fn new(config: ParseConfig) -> Result<Self> {
        if config.workers == 0 {
            return Err(NasError::Configuration {
                message: "workers must be at least 1".to_string(),
            });
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Discover and parse every data file under `root`
    pub async fn parse_directory(&self, root: impl AsRef<Path>) -> Result<BatchOutcome> {
        let discovery = FileDiscovery::new(root.as_ref());
        let files = task::spawn_blocking(move || discovery.discover())
            .await
            .map_err(|e| NasError::TaskFailed {
                path: root.as_ref().to_path_buf(),
                reason: e.to_string(),
            })??;
        self.parse_files(files).await
    }

    /// Parse every file matching a glob pattern
    pub async fn parse_glob(&self, pattern: &str) -> Result<BatchOutcome> {
        let files = discover_glob(pattern)?;
        self.parse_files(files).await
    }

    /// Parse the given files concurrently; outcomes keep the input order
    pub async fn parse_files(&self, paths: Vec<PathBuf>) -> Result<BatchOutcome> {
        let start_time = Instant::now();
        let workers = self.config.workers;
        info!(
            "Parsing {} files with {} workers",
            paths.len(),
            workers
        );

        let semaphore = Arc::new(Semaphore::new(workers));
        let config = Arc::new(self.config.clone());

        let mut outcomes = stream::iter(paths.into_iter().enumerate())
            .map(|(index, path)| {
                let sem = semaphore.clone();
                let config = config.clone();
                async move {
                    let result = match sem.acquire().await {
                        Ok(_permit) => {
                            let task_path = path.clone();
                            task::spawn_blocking(move || {
                                Naspy::parse_file_with_config(&task_path, &config)
                            })
                            .await
                            .unwrap_or_else(|e| {
                                Err(NasError::TaskFailed {
                                    path: path.clone(),
                                    reason: e.to_string(),
                                })
                            })
                        }
                        Err(e) => Err(NasError::TaskFailed {
                            path: path.clone(),
                            reason: e.to_string(),
                        }),
                    };
                    (index, FileOutcome { path, result })
                }
            })
            .buffer_unordered(workers)
            .collect::<Vec<_>>()
            .await;

        outcomes.sort_by_key(|(index, _)| *index);
        let files: Vec<FileOutcome> = outcomes.into_iter().map(|(_, outcome)| outcome).collect();

        let mut stats = BatchStats::default();
        for outcome in &files {
            match &outcome.result {
                Ok(parsed) => {
                    stats.files_parsed += 1;
                    stats.total_rows += parsed.data().len();
                }
                Err(e) => {
                    stats.files_failed += 1;
                    warn!("Failed to parse {}: {}", outcome.path.display(), e);
                }
            }
        }
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Parsed {} files ({} failed), {} rows in {}ms",
            stats.files_parsed, stats.files_failed, stats.total_rows, stats.processing_time_ms
        );

        Ok(BatchOutcome { files, stats })
    }
}
